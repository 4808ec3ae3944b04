//! Markdown reports for search results.
//!
//! Callers parse and display this output, so its layout is fixed:
//!
//! ```text
//! ## Hybrid Search Results
//!
//! ### 1. <title>
//! **Score:** 0.83
//!
//! <content>
//!
//! ---
//!
//! ```

use std::fmt::Write;

use crate::normalize::SearchResult;

pub fn no_results_message(label: &str) -> String {
    format!("No results found for your query using {}.", label)
}

/// Render results in the order given under a strategy heading.
pub fn render_markdown(label: &str, results: impl IntoIterator<Item = SearchResult>) -> String {
    let mut results = results.into_iter().peekable();
    if results.peek().is_none() {
        return no_results_message(label);
    }

    let mut out = format!("## {} Results\n\n", label);
    for (i, result) in results.enumerate() {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "### {}. {}\n**Score:** {:.2}\n\n{}\n\n---\n\n",
            i + 1,
            result.title,
            result.score,
            result.content
        );
    }
    out
}
