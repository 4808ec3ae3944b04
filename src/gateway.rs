//! The three callable search operations.
//!
//! Every operation returns a `String`, on success and on failure alike.
//! An unavailable backend yields [`UNAVAILABLE_MESSAGE`] without any
//! request being made; a failed request yields
//! `"Error performing <mode> search: <message>"`. Nothing here panics or
//! propagates an error to the caller, and a failed call leaves no state
//! behind for the next one.

use std::sync::Arc;

use crate::client::ClientState;
use crate::error::SearchError;
use crate::normalize::normalize;
use crate::render::render_markdown;
use crate::search::{dispatch, SearchMode, SearchRequest};

pub const UNAVAILABLE_MESSAGE: &str =
    "Error: Azure Search client is not initialized. Check server logs for details.";

/// Operation surface over a shared [`ClientState`].
#[derive(Debug, Clone)]
pub struct SearchGateway {
    state: Arc<ClientState>,
}

impl SearchGateway {
    pub fn new(state: Arc<ClientState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub async fn keyword_search(&self, query: &str, top: i64) -> String {
        self.run(SearchRequest::new(SearchMode::Keyword, query, top))
            .await
    }

    pub async fn vector_search(&self, query: &str, top: i64) -> String {
        self.run(SearchRequest::new(SearchMode::Vector, query, top))
            .await
    }

    pub async fn hybrid_search(&self, query: &str, top: i64) -> String {
        self.run(SearchRequest::new(SearchMode::Hybrid, query, top))
            .await
    }

    /// Dispatch, normalize, and render one request.
    pub async fn run(&self, request: SearchRequest) -> String {
        let mode = request.mode;
        tracing::info!(
            tool = mode.tool_name(),
            query = %request.query,
            top = request.top,
            index = request.index.as_deref().unwrap_or("default"),
            "Search invoked"
        );

        match self.search(&request).await {
            Ok(report) => report,
            Err(SearchError::Unavailable(reason)) => {
                tracing::warn!(tool = mode.tool_name(), reason = %reason, "Search client unavailable");
                UNAVAILABLE_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::error!(tool = mode.tool_name(), error = %e, "Search failed");
                format!("Error performing {} search: {}", mode, e)
            }
        }
    }

    async fn search(&self, request: &SearchRequest) -> Result<String, SearchError> {
        let backend = self.state.backend()?;
        let raw = dispatch(backend, request).await?;
        tracing::info!(
            tool = request.mode.tool_name(),
            results = raw.len(),
            "Search completed"
        );
        Ok(render_markdown(request.mode.label(), normalize(raw)))
    }
}
