//! Links and options shown next to the list picker in the configuration panel.

use navlist_types::{ListDescriptor, PLACEHOLDER_URL};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Key/text pair of the list picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub key: String,
    pub text: String,
}

/// Page where a new list can be created.
pub fn new_list_url(site_url: &str) -> String {
    format!("{}/_layouts/15/new.aspx", site_url.trim_end_matches('/'))
}

/// Default view of the selected list, or `#` when nothing is selected.
///
/// ```rust
/// use navlist_api::links::list_view_url;
/// use navlist_types::ListDescriptor;
///
/// let list = ListDescriptor::new("42", "Quick Links");
/// assert_eq!(list_view_url("https://contoso.sharepoint.com", Some(&list)), "https://contoso.sharepoint.com/Lists/QuickLinks");
/// assert_eq!(list_view_url("https://contoso.sharepoint.com", None), "#");
/// ```
pub fn list_view_url(site_url: &str, list: Option<&ListDescriptor>) -> String {
    match list {
        Some(list) => format!(
            "{}/Lists/{}",
            site_url.trim_end_matches('/'),
            WHITESPACE.replace_all(&list.title, "")
        ),
        None => PLACEHOLDER_URL.to_string(),
    }
}

/// Picker options: a "no selection" placeholder, then one option per list.
pub fn list_picker_options(lists: &[ListDescriptor]) -> Vec<PickerOption> {
    let placeholder = PickerOption {
        key: String::new(),
        text: "Select a list...".to_string(),
    };
    std::iter::once(placeholder)
        .chain(lists.iter().map(|list| PickerOption {
            key: list.id.clone(),
            text: list.title.clone(),
        }))
        .collect()
}
