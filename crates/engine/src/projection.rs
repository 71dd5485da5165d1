//! Row to navigation entry mapping.

use navlist_types::{
    DEFAULT_SECTION_KEY, FieldDescriptor, InferredSchema, NavigationEntry, PLACEHOLDER_URL, RawRow, RawValue, UNTITLED_TEXT,
};

/// Project rows into entries using each row's `Title` as the display fallback.
pub fn project(rows: &[RawRow], schema: &InferredSchema) -> Vec<NavigationEntry> {
    project_with_row_titles(rows, schema, RawRow::title)
}

/// Project rows into entries, one per row and in row order.
///
/// Display text falls back from the display column to `row_title_of` to
/// `"Untitled"`; the link falls back to `"#"`; the section to `"General"`.
/// Blank text counts as missing.
pub fn project_with_row_titles<F>(rows: &[RawRow], schema: &InferredSchema, row_title_of: F) -> Vec<NavigationEntry>
where
    F: Fn(&RawRow) -> Option<String>,
{
    rows.iter()
        .map(|row| NavigationEntry {
            display_text: column_text(row, schema.display_field.as_ref())
                .or_else(|| row_title_of(row).filter(|title| !title.trim().is_empty()))
                .unwrap_or_else(|| UNTITLED_TEXT.to_string()),
            target_url: resolve_link(row, schema.link_field.as_ref()),
            section_key: column_text(row, schema.section_field.as_ref())
                .unwrap_or_else(|| DEFAULT_SECTION_KEY.to_string()),
        })
        .collect()
}

fn column_text(row: &RawRow, field: Option<&FieldDescriptor>) -> Option<String> {
    field.and_then(|field| row.value(&field.internal_name).into_text())
}

/// Plain strings are used as-is; hyperlink objects prefer their URL, then
/// their description.
fn resolve_link(row: &RawRow, field: Option<&FieldDescriptor>) -> String {
    let Some(field) = field else {
        return PLACEHOLDER_URL.to_string();
    };

    let target = match row.value(&field.internal_name) {
        RawValue::Text(text) => Some(text),
        RawValue::Link { url, description } => url.or(description),
        RawValue::Null => None,
    };

    target
        .filter(|target| !target.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use navlist_types::FieldKind;
    use serde_json::{Value, json};

    fn schema(display: Option<&str>, link: Option<&str>, section: Option<&str>) -> InferredSchema {
        let field = |name: &str| FieldDescriptor::new(name, name, FieldKind::Text);
        InferredSchema {
            display_field: display.map(field),
            link_field: link.map(field),
            section_field: section.map(field),
        }
    }

    #[test]
    fn title_and_plain_link_with_default_section() {
        let schema = schema(None, Some("Link"), None);
        let rows = vec![RawRow::new().with("Title", json!("Home")).with("Link", json!("https://x"))];

        let entries = project(&rows, &schema);

        assert_eq!(entries, vec![NavigationEntry::new("Home", "https://x", "General")]);
    }

    #[test]
    fn empty_input_projects_to_nothing() {
        assert!(project(&[], &InferredSchema::default()).is_empty());
    }

    #[test]
    fn display_column_beats_title_and_blank_values_fall_through() {
        let schema = schema(Some("DisplayText"), None, None);
        let rows = vec![
            RawRow::new().with("Title", json!("Row title")).with("DisplayText", json!("Label")),
            RawRow::new().with("Title", json!("Row title")).with("DisplayText", json!("  ")),
            RawRow::new().with("DisplayText", Value::Null),
        ];

        let texts: Vec<_> = project(&rows, &schema).into_iter().map(|entry| entry.display_text).collect();

        assert_eq!(texts, vec!["Label", "Row title", "Untitled"]);
    }

    #[test]
    fn hyperlink_objects_prefer_url_then_description() {
        let schema = schema(None, Some("Link"), None);
        let rows = vec![
            RawRow::new().with("Link", json!({ "Url": "https://a", "Description": "A" })),
            RawRow::new().with("Link", json!({ "Description": "/relative" })),
            RawRow::new().with("Link", json!({})),
            RawRow::new().with("Link", json!("")),
            RawRow::new(),
        ];

        let links: Vec<_> = project(&rows, &schema).into_iter().map(|entry| entry.target_url).collect();

        assert_eq!(links, vec!["https://a", "/relative", "#", "#", "#"]);
    }

    #[test]
    fn missing_link_column_uses_placeholder() {
        let rows = vec![RawRow::new().with("Link", json!("https://ignored"))];
        assert_eq!(project(&rows, &InferredSchema::default())[0].target_url, "#");
    }

    #[test]
    fn section_values_are_read_verbatim() {
        let schema = schema(None, None, Some("Section"));
        let rows = vec![
            RawRow::new().with("Section", json!("News")),
            RawRow::new().with("Section", json!("")),
        ];

        let sections: Vec<_> = project(&rows, &schema).into_iter().map(|entry| entry.section_key).collect();

        assert_eq!(sections, vec!["News", "General"]);
    }

    #[test]
    fn custom_row_titles_are_used_as_fallback() {
        let rows = vec![RawRow::new().with("FileLeafRef", json!("report.docx"))];
        let entries = project_with_row_titles(&rows, &InferredSchema::default(), |row| {
            row.value("FileLeafRef").into_text()
        });
        assert_eq!(entries[0].display_text, "report.docx");
    }

    #[test]
    fn every_row_yields_one_non_empty_entry() {
        let schema = schema(Some("DisplayText"), Some("Link"), Some("Section"));
        let rows = vec![
            RawRow::new(),
            RawRow::new().with("Link", json!(["not", "a", "link"])),
            RawRow::new().with("DisplayText", json!(17)).with("Section", json!(false)),
        ];

        let entries = project(&rows, &schema);

        assert_eq!(entries.len(), rows.len());
        assert!(entries.iter().all(|entry| !entry.display_text.is_empty() && !entry.target_url.is_empty()));
        assert_eq!(entries[2].display_text, "17");
        assert_eq!(entries[2].section_key, "false");
    }
}
