//! Error types for list-service access.

use navlist_util::{JsonParseError, status_error_message};
use reqwest::StatusCode;
use thiserror::Error;

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ClientConfigError {
    #[error("no site URL configured; set NAVLIST_SITE_URL or pass --site-url")]
    MissingSiteUrl,

    #[error("invalid site URL '{url}': {reason}")]
    InvalidSiteUrl { url: String, reason: String },

    #[error("access token contains characters that cannot be sent in a header")]
    InvalidAccessToken,

    #[error("could not build the HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// A single failed request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status. `body` holds a redacted, truncated preview.
    #[error("{status}")]
    Status { status: StatusCode, body: String },

    #[error(transparent)]
    Decode(#[from] JsonParseError),

    #[error("response did not contain {expected}")]
    UnexpectedShape { expected: &'static str },

    #[error("malformed {record}: {source}")]
    Record {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(error) => error.status(),
            _ => None,
        }
    }
}

/// Failures of the three list-service reads.
#[derive(Debug, Error)]
pub enum ListSourceError {
    #[error("Failed to load lists: {0}")]
    Catalog(#[source] TransportError),

    #[error("Failed to load fields for list '{list_id}': {source}")]
    Fields {
        list_id: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to load navigation items: {source}")]
    Rows {
        list_id: String,
        #[source]
        source: TransportError,
    },
}

impl ListSourceError {
    pub fn transport(&self) -> &TransportError {
        match self {
            Self::Catalog(source) | Self::Fields { source, .. } | Self::Rows { source, .. } => source,
        }
    }

    /// Message suitable for showing in place of the navigation.
    ///
    /// Known auth statuses get a hint appended.
    ///
    /// ```rust
    /// use navlist_api::{ListSourceError, TransportError};
    /// use reqwest::StatusCode;
    ///
    /// let error = ListSourceError::Rows {
    ///     list_id: "a1".into(),
    ///     source: TransportError::Status { status: StatusCode::FORBIDDEN, body: String::new() },
    /// };
    /// let message = error.user_message();
    /// assert!(message.starts_with("Failed to load navigation items: 403 Forbidden"));
    /// assert!(message.contains("Hint"));
    /// ```
    pub fn user_message(&self) -> String {
        let hint = self
            .transport()
            .status()
            .and_then(|status| status_error_message(status.as_u16()));
        match hint {
            Some(hint) => format!("{self}. {hint}"),
            None => self.to_string(),
        }
    }
}
