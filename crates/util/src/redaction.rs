//! Redaction of credentials that may appear in logged request details or
//! error bodies returned by the list service.

use once_cell::sync::Lazy;
use regex::Regex;

const REDACTED: &str = "[REDACTED]";

static REDACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization:\s*)(bearer\s+)?([\w\-\.=:/+~]+)",
        r"(?i)(bearer\s+)([\w\-\.=:/+~]+)",
        r"(?i)([A-Z0-9_]*?(?:KEY|TOKEN|SECRET|PASSWORD)=)([^\s&]+)",
        r#"(?i)("(?:access_token|client_secret|refresh_token)"\s*:\s*")([^"]+)"#,
        r"(?i)((?:access_token|client_secret|refresh_token)=)([^\s&]+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Redacts values that look like secrets in a string.
///
/// Key names are kept so the redacted text still reads sensibly in logs.
///
/// # Example
/// ```rust
/// use navlist_util::redact_sensitive;
///
/// let redacted = redact_sensitive("NAVLIST_ACCESS_TOKEN=eyJ0eXAi.abc");
/// assert_eq!(redacted, "NAVLIST_ACCESS_TOKEN=[REDACTED]");
///
/// let redacted = redact_sensitive("Authorization: Bearer eyJ0eXAi.abc");
/// assert_eq!(redacted, "Authorization: [REDACTED]");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in REDACT_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |captures: &regex::Captures| {
                let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}{REDACTED}")
            })
            .into_owned();
    }
    redacted
}
