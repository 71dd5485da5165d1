//! Normalized navigation entries and the model exposed to presentation.

use serde::{Deserialize, Serialize};

/// One rendered link.
///
/// Every field is always populated; defaults are applied during projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub display_text: String,
    pub target_url: String,
    pub section_key: String,
}

impl NavigationEntry {
    pub fn new(display_text: impl Into<String>, target_url: impl Into<String>, section_key: impl Into<String>) -> Self {
        Self {
            display_text: display_text.into(),
            target_url: target_url.into(),
            section_key: section_key.into(),
        }
    }

    /// Absolute links leave the host page; relative ones and `#` stay.
    pub fn opens_in_new_tab(&self) -> bool {
        self.target_url.starts_with("http")
    }
}

/// Entries sharing a section key, in source row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSection {
    pub key: String,
    pub entries: Vec<NavigationEntry>,
}

/// At most [`crate::LINE_WIDTH`] entries drawn on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderLine {
    pub entries: Vec<NavigationEntry>,
}

impl RenderLine {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Navigation model handed to the presentation layer.
///
/// `Flat` is used until a list with a section column has been seen; after that
/// the model stays `Grouped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum NavigationModel {
    Flat(Vec<NavigationEntry>),
    Grouped(Vec<NavigationSection>),
}

impl Default for NavigationModel {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl NavigationModel {
    /// An empty model of the same variant.
    pub fn emptied(&self) -> Self {
        match self {
            Self::Flat(_) => Self::Flat(Vec::new()),
            Self::Grouped(_) => Self::Grouped(Vec::new()),
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }

    pub fn entry_count(&self) -> usize {
        match self {
            Self::Flat(entries) => entries.len(),
            Self::Grouped(sections) => sections.iter().map(|section| section.entries.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// All entries in presentation order.
    pub fn entries(&self) -> Box<dyn Iterator<Item = &NavigationEntry> + '_> {
        match self {
            Self::Flat(entries) => Box::new(entries.iter()),
            Self::Grouped(sections) => Box::new(sections.iter().flat_map(|section| section.entries.iter())),
        }
    }
}

/// Loading state of the current navigation model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ModelStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
    Ready,
}

impl ModelStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_links_open_in_new_tab() {
        assert!(NavigationEntry::new("A", "https://example.com", "General").opens_in_new_tab());
        assert!(!NavigationEntry::new("B", "/sites/home", "General").opens_in_new_tab());
        assert!(!NavigationEntry::new("C", "#", "General").opens_in_new_tab());
    }

    #[test]
    fn grouped_model_counts_and_flattens_in_section_order() {
        let model = NavigationModel::Grouped(vec![
            NavigationSection {
                key: "Events".into(),
                entries: vec![NavigationEntry::new("E1", "#", "Events")],
            },
            NavigationSection {
                key: "News".into(),
                entries: vec![
                    NavigationEntry::new("N1", "#", "News"),
                    NavigationEntry::new("N2", "#", "News"),
                ],
            },
        ]);
        assert_eq!(model.entry_count(), 3);
        let texts: Vec<_> = model.entries().map(|entry| entry.display_text.as_str()).collect();
        assert_eq!(texts, vec!["E1", "N1", "N2"]);
        assert!(model.emptied().is_grouped());
        assert!(model.emptied().is_empty());
    }

    #[test]
    fn status_serializes_with_message() {
        let value = serde_json::to_value(ModelStatus::Error("boom".into())).expect("serialize");
        assert_eq!(value, serde_json::json!({ "state": "error", "message": "boom" }));
    }
}
