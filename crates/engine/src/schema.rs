//! Column role inference.
//!
//! Backing lists are created by hand, so the same role shows up under
//! different column names across sites. Each role has an ordered table of
//! matchers; a field fills the role when any matcher accepts it, and the first
//! such field in supplied order wins. Comparisons are case-sensitive.

use navlist_types::{FieldDescriptor, FieldKind, InferredSchema};
use tracing::trace;

/// A column role used by projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Display,
    Link,
    Section,
}

/// A single predicate over a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMatcher {
    InternalName(&'static str),
    Title(&'static str),
    Kind(FieldKind),
}

impl FieldMatcher {
    pub fn matches(&self, field: &FieldDescriptor) -> bool {
        match self {
            Self::InternalName(name) => field.internal_name == *name,
            Self::Title(title) => field.display_name == *title,
            Self::Kind(kind) => field.kind == *kind,
        }
    }
}

const DISPLAY_MATCHERS: &[FieldMatcher] = &[
    FieldMatcher::InternalName("Display_x0020_Text"),
    FieldMatcher::InternalName("DisplayText"),
    FieldMatcher::InternalName("NavigationText"),
    FieldMatcher::Title("Display Text"),
];

const LINK_MATCHERS: &[FieldMatcher] = &[
    FieldMatcher::InternalName("Link"),
    FieldMatcher::InternalName("URL"),
    FieldMatcher::InternalName("NavigationLink"),
    FieldMatcher::Kind(FieldKind::Url),
    FieldMatcher::Title("Link"),
];

const SECTION_MATCHERS: &[FieldMatcher] = &[
    FieldMatcher::InternalName("Section"),
    FieldMatcher::InternalName("NavigationSection"),
    FieldMatcher::Title("Section"),
];

impl FieldRole {
    pub const ALL: [FieldRole; 3] = [FieldRole::Display, FieldRole::Link, FieldRole::Section];

    /// Matchers for this role in priority order.
    pub fn matchers(self) -> &'static [FieldMatcher] {
        match self {
            Self::Display => DISPLAY_MATCHERS,
            Self::Link => LINK_MATCHERS,
            Self::Section => SECTION_MATCHERS,
        }
    }

    /// Priority (index into [`FieldRole::matchers`]) of the first matcher
    /// accepting `field`.
    pub fn match_priority(self, field: &FieldDescriptor) -> Option<usize> {
        self.matchers().iter().position(|matcher| matcher.matches(field))
    }

    /// First field in `fields` that fills this role.
    pub fn select(self, fields: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
        fields.iter().find(|field| {
            let priority = self.match_priority(field);
            if let Some(priority) = priority {
                trace!(role = ?self, field = %field.internal_name, priority, "field matched role");
            }
            priority.is_some()
        })
    }
}

/// Infer display, link and section columns from a list's fields.
///
/// Total over any input; absent roles stay `None`.
pub fn infer(fields: &[FieldDescriptor]) -> InferredSchema {
    InferredSchema {
        display_field: FieldRole::Display.select(fields).cloned(),
        link_field: FieldRole::Link.select(fields).cloned(),
        section_field: FieldRole::Section.select(fields).cloned(),
    }
}
