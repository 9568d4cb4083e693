//! Case-insensitive substring search over the projected corpus.

use crate::event::{CanonicalField, ProjectedEvent};

/// Fields inspected by the keyword search.
pub const SEARCHED_FIELDS: [CanonicalField; 4] = [
    CanonicalField::Title,
    CanonicalField::Description,
    CanonicalField::Location,
    CanonicalField::Categories,
];

/// Returns the events containing `query` in any searched field.
///
/// Matching is a case-insensitive substring test. Absent or non-textual
/// fields are skipped. Corpus order is preserved and no ranking is applied.
pub fn search(corpus: &[ProjectedEvent], query: &str) -> Vec<ProjectedEvent> {
    let needle = query.to_lowercase();
    corpus
        .iter()
        .filter(|event| matches_lowercase(event, &needle))
        .cloned()
        .collect()
}

/// Returns whether a single event matches `query`.
pub fn matches(event: &ProjectedEvent, query: &str) -> bool {
    matches_lowercase(event, &query.to_lowercase())
}

fn matches_lowercase(event: &ProjectedEvent, needle: &str) -> bool {
    SEARCHED_FIELDS.iter().any(|field| {
        event
            .texts(*field)
            .iter()
            .any(|text| text.to_lowercase().contains(needle))
    })
}
