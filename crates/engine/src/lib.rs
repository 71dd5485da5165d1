//! # Navlist Engine
//!
//! Turns the rows of a hand-edited backing list into a navigation model.
//!
//! ## Pipeline
//!
//! Data flows one way:
//!
//! - **`schema`**: infer which columns hold display text, link and section
//! - **`projection`**: map each row to exactly one [`NavigationEntry`]
//! - **`grouping`**: collect entries into sections ordered by key
//! - **`chunking`**: split entries into lines of at most six links
//! - **`controller`**: drive the fetches for the selected list and publish the
//!   latest model, discarding responses for superseded selections
//!
//! The first four stages are pure and total; only chunking has an error path
//! (a non-positive width).
//!
//! ## Usage
//!
//! ```rust
//! use navlist_engine::{build_model, chunk, infer};
//! use navlist_types::{FieldDescriptor, FieldKind, LINE_WIDTH, NavigationModel, RawRow};
//! use serde_json::json;
//!
//! let fields = vec![FieldDescriptor::new("Link", "Link", FieldKind::Url)];
//! let schema = infer(&fields);
//! let rows = vec![RawRow::new().with("Title", json!("Home")).with("Link", json!("https://x"))];
//!
//! let model = build_model(&schema, &rows, false);
//! let NavigationModel::Flat(entries) = model else { unreachable!() };
//! assert_eq!(entries[0].display_text, "Home");
//! assert_eq!(chunk(&entries, LINE_WIDTH.get())?.len(), 1);
//! # Ok::<(), navlist_engine::ChunkError>(())
//! ```

pub mod chunking;
pub mod controller;
pub mod grouping;
pub mod projection;
pub mod schema;

pub use chunking::{ChunkError, SectionLines, chunk, render_lines};
pub use controller::{ModelSnapshot, NavigationController, SelectionOutcome};
pub use grouping::{SectionOrder, compare_section_keys, group};
pub use projection::{project, project_with_row_titles};
pub use schema::{FieldMatcher, FieldRole, infer};

use navlist_types::{InferredSchema, NavigationModel, RawRow};

/// Run projection and, when sections are in play, grouping.
///
/// `sections_seen` is true once any earlier run had a section column; the
/// model then stays grouped even for lists without one.
pub fn build_model(schema: &InferredSchema, rows: &[RawRow], sections_seen: bool) -> NavigationModel {
    let entries = project(rows, schema);
    if sections_seen || schema.has_section_field() {
        NavigationModel::Grouped(group(entries))
    } else {
        NavigationModel::Flat(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navlist_types::{FieldDescriptor, FieldKind};
    use serde_json::json;

    #[test]
    fn lists_with_a_section_column_build_grouped_models() {
        let schema = infer(&[FieldDescriptor::new("Section", "Section", FieldKind::Text)]);
        let rows = vec![RawRow::new().with("Title", json!("A")).with("Section", json!("News"))];
        let NavigationModel::Grouped(sections) = build_model(&schema, &rows, false) else {
            panic!("expected a grouped model");
        };
        assert_eq!(sections[0].key, "News");
    }

    #[test]
    fn sticky_grouping_applies_the_default_section() {
        let rows = vec![RawRow::new().with("Title", json!("A"))];
        let NavigationModel::Grouped(sections) = build_model(&InferredSchema::default(), &rows, true) else {
            panic!("expected a grouped model");
        };
        assert_eq!(sections[0].key, "General");
    }

    #[test]
    fn lists_without_sections_stay_flat() {
        let rows = vec![RawRow::new().with("Title", json!("A"))];
        assert!(!build_model(&InferredSchema::default(), &rows, false).is_grouped());
    }
}
