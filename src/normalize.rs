//! Mapping backend records into [`SearchResult`]s.
//!
//! Missing or mistyped fields are defaulted, never reported: a record
//! without a title is titled `"Unknown"`, one without a score scores `0`,
//! and one without a `chunk` has empty content.

use crate::client::RawResult;

/// Maximum number of characters kept from a record's content.
pub const CONTENT_LIMIT: usize = 1000;

pub const UNKNOWN_TITLE: &str = "Unknown";

/// The canonical result shape every strategy renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub content: String,
    pub score: f64,
}

impl From<RawResult> for SearchResult {
    fn from(raw: RawResult) -> Self {
        let title = raw
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();
        let content = raw
            .get("chunk")
            .and_then(|v| v.as_str())
            .map(truncate_chars)
            .unwrap_or_default();
        let score = raw
            .get("@search.score")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        SearchResult {
            title,
            content,
            score,
        }
    }
}

/// Keep the first [`CONTENT_LIMIT`] characters. The cut is exact and
/// ignores word boundaries.
pub fn truncate_chars(text: &str) -> String {
    match text.char_indices().nth(CONTENT_LIMIT) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Normalize records lazily, in backend order.
pub fn normalize(raw: Vec<RawResult>) -> impl Iterator<Item = SearchResult> {
    raw.into_iter().map(SearchResult::from)
}
