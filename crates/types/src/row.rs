//! Raw list rows as returned by the list service.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column name carrying the generic row title.
pub const TITLE_COLUMN: &str = "Title";

/// A single list row keyed by column internal name.
///
/// Rows are edited by hand in the backing list, so no column is guaranteed to
/// exist or to hold the expected shape. Lookups classify whatever is there
/// through [`RawValue`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    columns: IndexMap<String, Value>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with(mut self, column: impl Into<String>, value: Value) -> Self {
        self.columns.insert(column.into(), value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.columns.insert(column.into(), value);
    }

    /// Classified value of `column`; a missing column reads as [`RawValue::Null`].
    pub fn value(&self, column: &str) -> RawValue {
        self.columns.get(column).map(RawValue::from_json).unwrap_or(RawValue::Null)
    }

    /// The row's generic `Title` attribute, when it holds non-blank text.
    pub fn title(&self) -> Option<String> {
        self.value(TITLE_COLUMN).into_text()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<serde_json::Map<String, Value>> for RawRow {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            columns: map.into_iter().collect(),
        }
    }
}

impl FromIterator<(String, Value)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// A classified cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Plain text. Numbers and booleans are carried as their JSON rendering.
    Text(String),
    /// A hyperlink column value (`{ "Url": ..., "Description": ... }`).
    Link {
        url: Option<String>,
        description: Option<String>,
    },
    Null,
}

impl RawValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.clone()),
            Value::Number(number) => Self::Text(number.to_string()),
            Value::Bool(flag) => Self::Text(flag.to_string()),
            Value::Object(map) => Self::Link {
                url: string_attribute(map, &["Url", "url"]),
                description: string_attribute(map, &["Description", "description"]),
            },
            Value::Null | Value::Array(_) => Self::Null,
        }
    }

    /// Text content when it is non-blank. Link values do not count as text.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

fn string_attribute(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .filter_map(Value::as_str)
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}
