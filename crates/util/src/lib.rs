//! Helpers shared by the list client, the engine and the binary.

pub mod http;
pub mod redaction;
pub mod settings;

pub use http::{
    BODY_PREVIEW_LIMIT, JsonParseError, extract_collection_items, parse_response_json_strict, preview_body,
    status_error_message,
};
pub use redaction::redact_sensitive;
pub use settings::{SETTINGS_PATH_ENV, SettingsError, SettingsStore, WidgetSettings, expand_tilde};
