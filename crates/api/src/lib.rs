//! List-service client.
//!
//! This crate talks to the site's list REST API. It provides:
//!
//! - [`SharePointClient`], a thin wrapper around a configured `reqwest::Client`
//!   bound to one validated site URL
//! - the [`ListSource`] trait: catalog, field and row reads that the
//!   navigation engine depends on
//! - the fetch error taxonomy ([`ListSourceError`])
//! - helpers for the configuration panel ([`links`])
//!
//! # Example
//!
//! ```ignore
//! use navlist_api::{ListSource, SharePointClient};
//!
//! let client = SharePointClient::from_env()?;
//! let lists = client.fetch_catalog().await?;
//! for list in lists {
//!     println!("{} {}", list.id, list.title);
//! }
//! ```

mod error;
pub mod links;
mod source;

pub use error::{ClientConfigError, ListSourceError, TransportError};
pub use source::ListSource;

use std::env;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, header};
use tracing::debug;
use url::Url;

/// Environment variable naming the site whose lists are read.
pub const SITE_URL_ENV: &str = "NAVLIST_SITE_URL";
/// Environment variable carrying a bearer token for the site.
pub const ACCESS_TOKEN_ENV: &str = "NAVLIST_ACCESS_TOKEN";

/// Hostnames allowed to use plain HTTP for local development.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// `nometadata` keeps payloads to `{"value": [...]}` with bare column values.
const ACCEPT_JSON: &str = "application/json;odata=nometadata";

/// Client bound to a single site.
#[derive(Debug, Clone)]
pub struct SharePointClient {
    pub site_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl SharePointClient {
    /// Build a client for `site_url`, optionally authenticating with a bearer token.
    ///
    /// The URL must include a host; non-localhost hosts must use HTTPS.
    /// A trailing `/` is dropped so API paths can be appended directly.
    pub fn new(site_url: &str, access_token: Option<&str>) -> Result<Self, ClientConfigError> {
        let site_url = validate_site_url(site_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_JSON));
        if let Some(token) = access_token.map(str::trim).filter(|token| !token.is_empty()) {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientConfigError::InvalidAccessToken)?;
            value.set_sensitive(true);
            default_headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ClientConfigError::Build)?;

        Ok(Self {
            site_url,
            http,
            user_agent: format!("navlist/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Build a client from `NAVLIST_SITE_URL` and `NAVLIST_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, ClientConfigError> {
        let site_url = env::var(SITE_URL_ENV).map_err(|_| ClientConfigError::MissingSiteUrl)?;
        let token = env::var(ACCESS_TOKEN_ENV).ok();
        Self::new(&site_url, token.as_deref())
    }

    /// Build a request for a site-relative path such as `/_api/web/lists`.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.site_url, path);
        debug!(%url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }
}

/// Validate a site URL and return it without a trailing slash.
///
/// Rules:
/// - the URL must parse and carry a host
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: the scheme must be HTTPS
fn validate_site_url(raw: &str) -> Result<String, ClientConfigError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|error| ClientConfigError::InvalidSiteUrl {
        url: trimmed.to_string(),
        reason: error.to_string(),
    })?;

    let host = parsed.host_str().ok_or_else(|| ClientConfigError::InvalidSiteUrl {
        url: trimmed.to_string(),
        reason: "URL must include a host".to_string(),
    })?;

    let is_local = LOCALHOST_DOMAINS.iter().any(|&allowed| host.eq_ignore_ascii_case(allowed));
    if !is_local && parsed.scheme() != "https" {
        return Err(ClientConfigError::InvalidSiteUrl {
            url: trimmed.to_string(),
            reason: format!("site must use https for non-localhost hosts; got '{}://'", parsed.scheme()),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
