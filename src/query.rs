//! Read-only views over a collection: free-text search combined with a tag filter.

use crate::Record;

/// Returns the records matching both `search` and `selected_tags`, in their
/// original order.
///
/// The search is a case-insensitive substring test against each of the
/// record's searchable fields; an empty term matches everything. A record
/// passes the tag filter when no tags are selected or when it carries at
/// least one of them.
pub fn filter<'a, R: Record>(records: &'a [R], search: &str, selected_tags: &[String]) -> Vec<&'a R> {
    let term = search.to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(*record, &term) && matches_tags(*record, selected_tags))
        .collect()
}

/// `term` must already be lower-cased.
fn matches_search<R: Record>(record: &R, term: &str) -> bool {
    term.is_empty()
        || record
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(term))
}

fn matches_tags<R: Record>(record: &R, selected_tags: &[String]) -> bool {
    selected_tags.is_empty() || selected_tags.iter().any(|tag| record.tags().contains(tag))
}

/// The active tag filter, in the order tags were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `tag` if it is not selected, deselects it otherwise.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if let Some(index) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(index);
            false
        } else {
            self.tags.push(tag.to_string());
            true
        }
    }

    pub fn select(&mut self, tag: &str) {
        if !self.contains(tag) {
            self.tags.push(tag.to_string());
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = TagSelection::new();
        for tag in iter {
            selection.select(tag.as_ref());
        }
        selection
    }
}
