//! Section grouping.

use std::cmp::Ordering;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use indexmap::IndexMap;
use navlist_types::{NavigationEntry, NavigationSection};
use tracing::warn;

/// Group entries by exact section key and order the sections for display.
///
/// Entries keep their relative order inside a section. Keys are compared
/// ordinally when grouping and with [`SectionOrder`] when sorting.
pub fn group(entries: Vec<NavigationEntry>) -> Vec<NavigationSection> {
    let mut buckets: IndexMap<String, Vec<NavigationEntry>> = IndexMap::new();
    for entry in entries {
        buckets.entry(entry.section_key.clone()).or_default().push(entry);
    }

    let mut sections: Vec<NavigationSection> = buckets
        .into_iter()
        .map(|(key, entries)| NavigationSection { key, entries })
        .collect();
    let order = SectionOrder::new();
    sections.sort_by(|left, right| order.compare(&left.key, &right.key));
    sections
}

/// Locale-aware ordering for section headings.
///
/// Uses the root-locale collator at tertiary strength: base letters decide
/// first ("Alpha" < "Événements" < "Zeta"), then accents, then case. Keys the
/// collator treats as equal fall back to ordinal comparison.
pub struct SectionOrder {
    collator: Option<CollatorBorrowed<'static>>,
}

impl SectionOrder {
    pub fn new() -> Self {
        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Tertiary);
        let collator = Collator::try_new(Default::default(), options)
            .inspect_err(|error| warn!(%error, "section collator unavailable; using case-folded ordering"))
            .ok();
        Self { collator }
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(left, right),
            None => {
                let folded_left = left.chars().flat_map(char::to_lowercase);
                let folded_right = right.chars().flat_map(char::to_lowercase);
                folded_left.cmp(folded_right)
            }
        };
        primary.then_with(|| left.cmp(right))
    }
}

impl Default for SectionOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two section keys with a fresh [`SectionOrder`].
pub fn compare_section_keys(left: &str, right: &str) -> Ordering {
    SectionOrder::new().compare(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, section: &str) -> NavigationEntry {
        NavigationEntry::new(text, "#", section)
    }

    #[test]
    fn sections_sort_by_key_and_keep_item_order() {
        let entries = vec![entry("n1", "News"), entry("e1", "Events"), entry("n2", "News")];

        let sections = group(entries);

        let keys: Vec<_> = sections.iter().map(|section| section.key.as_str()).collect();
        assert_eq!(keys, vec!["Events", "News"]);
        let news: Vec<_> = sections[1].entries.iter().map(|entry| entry.display_text.as_str()).collect();
        assert_eq!(news, vec!["n1", "n2"]);
    }

    #[test]
    fn empty_input_groups_to_nothing() {
        assert!(group(Vec::new()).is_empty());
    }

    #[test]
    fn case_only_decides_between_otherwise_equal_keys() {
        let entries = vec![
            entry("c", "cherry"),
            entry("b", "Banana"),
            entry("a", "apple"),
            entry("N", "News"),
            entry("n", "news"),
        ];

        let keys: Vec<_> = group(entries).into_iter().map(|section| section.key).collect();

        assert_eq!(keys, vec!["apple", "Banana", "cherry", "news", "News"]);
    }

    #[test]
    fn accented_keys_sort_by_their_base_letters() {
        let entries = vec![entry("z", "Zeta"), entry("e", "Événements"), entry("a", "Alpha")];

        let keys: Vec<_> = group(entries).into_iter().map(|section| section.key).collect();

        assert_eq!(keys, vec!["Alpha", "Événements", "Zeta"]);
    }

    #[test]
    fn accents_only_break_ties_between_equal_base_letters() {
        let order = SectionOrder::new();
        assert_eq!(order.compare("Ecole", "École"), Ordering::Less);
        assert_eq!(order.compare("École", "Ecoles"), Ordering::Less);
        assert_eq!(compare_section_keys("News", "News"), Ordering::Equal);
    }

    #[test]
    fn grouping_preserves_every_entry_once() {
        let entries: Vec<_> = (0..20)
            .map(|index| entry(&format!("item-{index}"), ["A", "B", "C"][index % 3]))
            .collect();

        let sections = group(entries.clone());

        let mut flattened: Vec<_> = sections.into_iter().flat_map(|section| section.entries).collect();
        let mut original = entries;
        flattened.sort_by(|left, right| left.display_text.cmp(&right.display_text));
        original.sort_by(|left, right| left.display_text.cmp(&right.display_text));
        assert_eq!(flattened, original);
    }
}
