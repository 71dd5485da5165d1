//! Shared value types for list-backed navigation.
//!
//! Everything here is plain data: descriptors fetched from the list service,
//! the schema inferred from them, and the navigation entries handed to the
//! presentation layer. None of these types own I/O.

pub mod navigation;
pub mod row;

pub use navigation::{ModelStatus, NavigationEntry, NavigationModel, NavigationSection, RenderLine};
pub use row::{RawRow, RawValue};

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Section key applied to entries whose row has no section value.
pub const DEFAULT_SECTION_KEY: &str = "General";

/// Display text applied when neither the display field nor the row title has a value.
pub const UNTITLED_TEXT: &str = "Untitled";

/// Link target applied when a row carries no usable link.
pub const PLACEHOLDER_URL: &str = "#";

/// Number of links rendered on one navigation line.
pub const LINE_WIDTH: NonZeroUsize = NonZeroUsize::new(6).unwrap();

/// Upper bound on the rows read from a backing list.
pub const ROW_PAGE_LIMIT: usize = 500;

/// A selectable backing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDescriptor {
    pub id: String,
    pub title: String,
}

impl ListDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Coarse classification of a list column's storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Url,
    Text,
    Other,
}

impl FieldKind {
    /// Classify the service's `TypeAsString` tag.
    ///
    /// ```rust
    /// use navlist_types::FieldKind;
    ///
    /// assert_eq!(FieldKind::from_type_tag("URL"), FieldKind::Url);
    /// assert_eq!(FieldKind::from_type_tag("Note"), FieldKind::Text);
    /// assert_eq!(FieldKind::from_type_tag("Choice"), FieldKind::Other);
    /// ```
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "URL" => Self::Url,
            "Text" | "Note" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// A column definition of a backing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable column name used in row payloads (e.g. `Display_x0020_Text`).
    pub internal_name: String,
    /// Human-readable column title shown to list editors.
    pub display_name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(internal_name: impl Into<String>, display_name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            internal_name: internal_name.into(),
            display_name: display_name.into(),
            kind,
        }
    }
}

/// Column roles inferred from a list's field definitions.
///
/// A schema is always recomputed as a whole when the selected list changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredSchema {
    pub display_field: Option<FieldDescriptor>,
    pub link_field: Option<FieldDescriptor>,
    pub section_field: Option<FieldDescriptor>,
}

impl InferredSchema {
    pub fn has_section_field(&self) -> bool {
        self.section_field.is_some()
    }

    /// Column names to request when reading rows: `Id`, `Title`, then every
    /// inferred column, without duplicates.
    pub fn select_fields(&self) -> Vec<String> {
        let mut names = vec!["Id".to_string(), "Title".to_string()];
        let inferred = [&self.display_field, &self.link_field, &self.section_field];
        for field in inferred.into_iter().flatten() {
            if !names.iter().any(|name| name == &field.internal_name) {
                names.push(field.internal_name.clone());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_fields_starts_with_identity_columns() {
        let schema = InferredSchema::default();
        assert_eq!(schema.select_fields(), vec!["Id", "Title"]);
    }

    #[test]
    fn select_fields_deduplicates_shared_columns() {
        let link = FieldDescriptor::new("Link", "Link", FieldKind::Url);
        let schema = InferredSchema {
            display_field: Some(FieldDescriptor::new("Title", "Title", FieldKind::Text)),
            link_field: Some(link.clone()),
            section_field: Some(link),
        };
        assert_eq!(schema.select_fields(), vec!["Id", "Title", "Link"]);
    }
}
