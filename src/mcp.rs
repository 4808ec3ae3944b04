//! MCP JSON-RPC protocol bridge.
//!
//! Adapts the [`ToolRegistry`] to the rmcp [`ServerHandler`] interface so
//! that any MCP client (over stdio or streamable HTTP) can list and call
//! the search tools.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler};

use crate::traits::{ToolContext, ToolRegistry};

/// Bridges the tool registry to the MCP JSON-RPC protocol.
///
/// Each MCP session receives a clone of this struct (everything is
/// behind `Arc`), so all sessions share one backend client.
#[derive(Clone)]
pub struct McpBridge {
    tools: Arc<ToolRegistry>,
    ctx: ToolContext,
}

impl McpBridge {
    pub fn new(tools: Arc<ToolRegistry>, ctx: ToolContext) -> Self {
        Self { tools, ctx }
    }

    /// Convert a tool into an rmcp `Tool` descriptor.
    fn to_mcp_tool(tool: &dyn crate::traits::Tool) -> Tool {
        let input_schema: Arc<serde_json::Map<String, serde_json::Value>> =
            match tool.parameters_schema() {
                serde_json::Value::Object(map) => Arc::new(map),
                _ => Arc::new(serde_json::Map::new()),
            };

        Tool {
            name: Cow::Owned(tool.name().to_string()),
            title: None,
            description: Some(Cow::Owned(tool.description().to_string())),
            input_schema,
            output_schema: None,
            annotations: Some(ToolAnnotations::new().read_only(true)),
            execution: None,
            icons: None,
            meta: None,
        }
    }
}

impl ServerHandler for McpBridge {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "azure-search".to_string(),
                title: Some("Azure AI Search".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Search an Azure AI Search index. Use keyword_search for exact terms, \
                 vector_search for conceptual similarity, and hybrid_search to combine both. \
                 Each tool takes a query and an optional number of results (top)."
                    .to_string(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools: Vec<Tool> = self
            .tools
            .tools()
            .iter()
            .map(|t| Self::to_mcp_tool(t.as_ref()))
            .collect();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tools.find(name).map(Self::to_mcp_tool)
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool = self.tools.find(&request.name).ok_or_else(|| {
            McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("no tool registered with name: {}", request.name),
                None,
            )
        })?;

        let params = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let text = tool
            .execute(params, &self.ctx)
            .await
            .map_err(|e| McpError::new(ErrorCode::INVALID_PARAMS, e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientState;

    fn bridge() -> McpBridge {
        McpBridge::new(
            Arc::new(ToolRegistry::with_builtins()),
            ToolContext::new(Arc::new(ClientState::Unavailable("missing".to_string()))),
        )
    }

    #[test]
    fn test_tools_are_read_only() {
        let registry = ToolRegistry::with_builtins();
        for tool in registry.tools() {
            let mcp_tool = McpBridge::to_mcp_tool(tool.as_ref());
            assert_eq!(mcp_tool.name, tool.name());
            let annotations = mcp_tool.annotations.expect("annotations");
            assert_eq!(annotations.read_only_hint, Some(true));
            assert_eq!(
                mcp_tool.input_schema.get("required"),
                Some(&serde_json::json!(["query"]))
            );
        }
    }

    #[test]
    fn test_get_tool_by_name() {
        let bridge = bridge();
        assert!(bridge.get_tool("vector_search").is_some());
        assert!(bridge.get_tool("list_indexes").is_none());
    }

    #[test]
    fn test_server_info() {
        let info = bridge().get_info();
        assert_eq!(info.server_info.name, "azure-search");
        assert!(info.capabilities.tools.is_some());
    }
}
