//! Search strategies and request construction.
//!
//! Three strategies share one request shape:
//!
//! | Mode | `search` text | `vectorQueries` |
//! |------|---------------|-----------------|
//! | [`SearchMode::Keyword`] | query | none |
//! | [`SearchMode::Vector`] | none | one text query, k = 50 |
//! | [`SearchMode::Hybrid`] | query | one text query, k = 50 |
//!
//! The backend embeds the text of vector queries itself and fuses the
//! lexical and vector rankings for hybrid requests. `top` only bounds how
//! many of the ranked results come back; it never changes `k`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::client::{RawResult, SearchBackend};
use crate::config::SearchSettings;
use crate::error::SearchError;

/// Candidates requested from the vector component of a query.
pub const NEAREST_NEIGHBORS: usize = 50;

/// Result count used when a caller does not supply one.
pub const DEFAULT_TOP: usize = 5;

/// Fields fetched for every result.
pub const SELECT_FIELDS: &str = "title,chunk";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Keyword,
    Vector,
    Hybrid,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Keyword, SearchMode::Vector, SearchMode::Hybrid];

    /// Human-readable strategy name used in rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Keyword => "Keyword Search",
            SearchMode::Vector => "Vector Search",
            SearchMode::Hybrid => "Hybrid Search",
        }
    }

    /// Short name used in error strings and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Keyword => "keyword",
            SearchMode::Vector => "vector",
            SearchMode::Hybrid => "hybrid",
        }
    }

    /// Name of the callable operation for this strategy.
    pub fn tool_name(self) -> &'static str {
        match self {
            SearchMode::Keyword => "keyword_search",
            SearchMode::Vector => "vector_search",
            SearchMode::Hybrid => "hybrid_search",
        }
    }

    fn uses_text(self) -> bool {
        matches!(self, SearchMode::Keyword | SearchMode::Hybrid)
    }

    fn uses_vectors(self) -> bool {
        matches!(self, SearchMode::Vector | SearchMode::Hybrid)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyword" => Ok(SearchMode::Keyword),
            "vector" => Ok(SearchMode::Vector),
            "hybrid" => Ok(SearchMode::Hybrid),
            other => Err(format!(
                "Unknown search mode: {}. Use keyword, vector, or hybrid.",
                other
            )),
        }
    }
}

/// One search call as issued by an operation.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub top: usize,
    pub mode: SearchMode,
    pub filter: Option<String>,
    /// Index to search instead of the configured one.
    pub index: Option<String>,
}

impl SearchRequest {
    /// Build a request, raising `top` to at least 1.
    pub fn new(mode: SearchMode, query: impl Into<String>, top: i64) -> Self {
        Self {
            query: query.into(),
            top: top.max(1) as usize,
            mode,
            filter: None,
            index: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.trim().is_empty());
        self
    }

    pub fn with_index(mut self, index: Option<String>) -> Self {
        self.index = index
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());
        self
    }
}

/// Body of a `POST /indexes/{index}/docs/search` request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub top: usize,
    pub select: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_configuration: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vector_queries: Vec<VectorQuery>,
}

/// A vectorizable text query; the service embeds `text` itself.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VectorQuery {
    pub kind: &'static str,
    pub text: String,
    pub k: usize,
    pub fields: String,
}

/// Shape the wire request for a strategy.
pub fn build_query(request: &SearchRequest, options: &QueryOptions) -> BackendQuery {
    let mode = request.mode;

    let vector_queries = if mode.uses_vectors() {
        vec![VectorQuery {
            kind: "text",
            text: request.query.clone(),
            k: NEAREST_NEIGHBORS,
            fields: options.vector_field.clone(),
        }]
    } else {
        Vec::new()
    };

    // Semantic reranking needs query text, so vector-only requests skip it.
    let semantic = options
        .semantic_configuration
        .clone()
        .filter(|_| mode.uses_text());

    BackendQuery {
        search: mode.uses_text().then(|| request.query.clone()),
        top: request.top,
        select: SELECT_FIELDS.to_string(),
        filter: request.filter.clone(),
        query_type: semantic.as_ref().map(|_| "semantic".to_string()),
        semantic_configuration: semantic,
        vector_queries,
    }
}

/// Per-index options that shape every request.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub vector_field: String,
    pub semantic_configuration: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            vector_field: "text_vector".to_string(),
            semantic_configuration: None,
        }
    }
}

impl From<&SearchSettings> for QueryOptions {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            vector_field: settings.vector_field.clone(),
            semantic_configuration: settings.semantic_configuration.clone(),
        }
    }
}

/// Issue one strategy-specific search. Failures are returned, never retried.
pub async fn dispatch(
    backend: &dyn SearchBackend,
    request: &SearchRequest,
) -> Result<Vec<RawResult>, SearchError> {
    let query = build_query(request, backend.query_options());
    backend.search(request.index.as_deref(), &query).await
}
