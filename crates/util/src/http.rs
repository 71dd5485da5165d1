//! # HTTP Utilities
//!
//! Response handling shared by the list-service client: strict JSON parsing
//! with a readable body preview, user-facing hints for auth failures, and
//! extraction of the row array from OData-shaped payloads.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Return a user-friendly hint for common HTTP status codes.
///
/// # Example
/// ```rust
/// use navlist_util::http::status_error_message;
///
/// let error_401 = status_error_message(401).unwrap();
/// assert!(error_401.contains("NAVLIST_ACCESS_TOKEN"));
///
/// let error_403 = status_error_message(403).unwrap();
/// assert!(error_403.contains("Forbidden"));
///
/// assert!(status_error_message(500).is_none());
/// ```
pub fn status_error_message(status_code: u16) -> Option<String> {
    match status_code {
        401 => Some("Unauthorized (401). Hint: set NAVLIST_ACCESS_TOKEN=... for the site".into()),
        403 => Some("Forbidden (403). Hint: check that the account can read the selected list".into()),
        404 => Some("Not Found (404). Hint: the list may have been deleted or renamed".into()),
        _ => None,
    }
}

/// Parse HTTP response text into JSON, providing detailed errors on failure.
///
/// # Errors
/// Returns a [`JsonParseError`] carrying the status and up to 200 characters
/// of the body with whitespace collapsed.
pub fn parse_response_json_strict(text: &str, status: Option<StatusCode>) -> Result<Value, JsonParseError> {
    serde_json::from_str::<Value>(text).map_err(|error| {
        let status_note = status
            .map(|code| format!("status {code}"))
            .unwrap_or_else(|| "unknown status".to_string());
        let preview = preview_body(text, BODY_PREVIEW_LIMIT);

        JsonParseError::new(status_note, error, preview)
    })
}

/// Pull the item array out of a list-service payload.
///
/// Accepted shapes, in order:
/// 1. a bare array,
/// 2. `{"value": [...]}` (OData v4 / `nometadata`),
/// 3. `{"d": {"results": [...]}}` (OData verbose),
/// 4. `{"d": [...]}`.
///
/// ```rust
/// use navlist_util::http::extract_collection_items;
/// use serde_json::json;
///
/// let verbose = json!({ "d": { "results": [{ "Id": 1 }] } });
/// assert_eq!(extract_collection_items(&verbose).map(|items| items.len()), Some(1));
/// assert!(extract_collection_items(&json!({ "error": "nope" })).is_none());
/// ```
pub fn extract_collection_items(payload: &Value) -> Option<Vec<Value>> {
    if let Value::Array(items) = payload {
        return Some(items.clone());
    }

    if let Some(Value::Array(items)) = payload.get("value") {
        return Some(items.clone());
    }

    match payload.get("d") {
        Some(Value::Array(items)) => Some(items.clone()),
        Some(envelope) => envelope.get("results").and_then(Value::as_array).cloned(),
        None => None,
    }
}

/// Preview length used for error bodies in logs and error messages.
pub const BODY_PREVIEW_LIMIT: usize = 200;

/// Collapse whitespace runs and cut `text` to `limit` characters.
///
/// Blank bodies preview as `<empty>`; cut previews end in `...`.
pub fn preview_body(text: &str, limit: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "<empty>".to_string();
    }
    match collapsed.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &collapsed[..cut]),
        None => collapsed,
    }
}

/// Error returned when strict JSON parsing of an HTTP response fails.
#[derive(Debug, Error)]
#[error("failed to parse JSON response ({status_note}): {source}. body preview: {body_preview}")]
pub struct JsonParseError {
    status_note: String,
    #[source]
    source: serde_json::Error,
    body_preview: String,
}

impl JsonParseError {
    pub fn new(status_note: String, source: serde_json::Error, body_preview: String) -> Self {
        Self {
            status_note,
            source,
            body_preview,
        }
    }

    pub fn body_preview(&self) -> &str {
        &self.body_preview
    }
}
