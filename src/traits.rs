//! Tool trait and registry.
//!
//! Every callable operation is a [`Tool`]: a name, a description, a JSON
//! Schema for its arguments, and an `execute` that always produces text.
//! The MCP bridge and the REST routes dispatch through the same
//! [`ToolRegistry`], so both transports expose identical tools.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              ToolRegistry                │
//! │  keyword_search  vector_search  hybrid_… │
//! └──────────────┬───────────────────────────┘
//!                ▼
//!        SearchGateway → ClientState
//! ```
//!
//! # Usage
//!
//! ```rust
//! use azure_search_mcp::traits::ToolRegistry;
//!
//! let tools = ToolRegistry::with_builtins();
//! assert!(tools.find("hybrid_search").is_some());
//! ```

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::client::ClientState;
use crate::gateway::SearchGateway;
use crate::search::{SearchMode, SearchRequest, DEFAULT_TOP};

/// A tool that agents can discover and call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's name, e.g. `"keyword_search"`.
    fn name(&self) -> &str;

    /// Returns a one-line description for agent discovery.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool.
    ///
    /// An `Err` means the arguments could not be understood; failures of
    /// the operation itself are reported inside the returned text.
    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<String>;
}

/// Shared state handed to every tool invocation.
#[derive(Debug, Clone)]
pub struct ToolContext {
    gateway: SearchGateway,
}

impl ToolContext {
    pub fn new(state: Arc<ClientState>) -> Self {
        Self {
            gateway: SearchGateway::new(state),
        }
    }

    pub fn gateway(&self) -> &SearchGateway {
        &self.gateway
    }
}

/// Arguments accepted by every search tool.
#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default = "default_top")]
    pub top: i64,
    #[serde(default)]
    pub filter: Option<String>,
    /// Search this index instead of the configured one.
    #[serde(default)]
    pub index_name: Option<String>,
}

fn default_top() -> i64 {
    DEFAULT_TOP as i64
}

/// One of the three search operations.
pub struct SearchTool {
    mode: SearchMode,
}

impl SearchTool {
    pub fn new(mode: SearchMode) -> Self {
        Self { mode }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        self.mode.tool_name()
    }

    fn description(&self) -> &str {
        match self.mode {
            SearchMode::Keyword => {
                "Search the Azure AI Search index using keyword (full-text) matching"
            }
            SearchMode::Vector => {
                "Search the Azure AI Search index using vector similarity over embedded content"
            }
            SearchMode::Hybrid => {
                "Search the Azure AI Search index combining keyword and vector similarity"
            }
        }
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query text" },
                "top": {
                    "type": "integer",
                    "description": "Number of results to return",
                    "default": DEFAULT_TOP,
                    "minimum": 1
                },
                "filter": {
                    "type": "string",
                    "description": "Optional OData filter expression (e.g. category eq 'docs')"
                },
                "index_name": {
                    "type": "string",
                    "description": "Optional index to search instead of the configured default"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<String> {
        let args: SearchArgs = serde_json::from_value(params)
            .map_err(|e| anyhow::anyhow!("invalid arguments for {}: {}", self.name(), e))?;

        let request = SearchRequest::new(self.mode, args.query, args.top)
            .with_filter(args.filter)
            .with_index(args.index_name);
        Ok(ctx.gateway().run(request).await)
    }
}

/// Registry of callable tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry holding `keyword_search`, `vector_search`, and `hybrid_search`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for mode in SearchMode::ALL {
            registry.register(Box::new(SearchTool::new(mode)));
        }
        registry
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    pub fn tools(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::UNAVAILABLE_MESSAGE;
    use serde_json::json;

    fn unavailable_ctx() -> ToolContext {
        ToolContext::new(Arc::new(ClientState::Unavailable("missing".to_string())))
    }

    #[test]
    fn test_builtins_in_order() {
        let registry = ToolRegistry::with_builtins();
        let names: Vec<&str> = registry.tools().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["keyword_search", "vector_search", "hybrid_search"]);
        assert!(registry.find("search").is_none());
    }

    #[test]
    fn test_schema_requires_query() {
        let tool = SearchTool::new(SearchMode::Vector);
        let schema = tool.parameters_schema();
        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(schema["properties"]["top"]["default"], json!(5));
    }

    #[tokio::test]
    async fn test_execute_defaults_top_and_reports_unavailable() {
        let registry = ToolRegistry::with_builtins();
        let ctx = unavailable_ctx();
        for tool in registry.tools() {
            let out = tool.execute(json!({ "query": "q" }), &ctx).await.unwrap();
            assert_eq!(out, UNAVAILABLE_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_execute_rejects_missing_query() {
        let tool = SearchTool::new(SearchMode::Keyword);
        let err = tool
            .execute(json!({ "top": 3 }), &unavailable_ctx())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid arguments for keyword_search"));
    }

    #[test]
    fn test_search_args_defaults() {
        let args: SearchArgs = serde_json::from_value(json!({ "query": "q" })).unwrap();
        assert_eq!(args.top, 5);
        assert!(args.filter.is_none());
        assert!(args.index_name.is_none());
    }
}
