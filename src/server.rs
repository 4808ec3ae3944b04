//! MCP server transports.
//!
//! The search tools are served either over stdio (the host spawns the
//! binary and speaks JSON-RPC on stdin/stdout) or over HTTP.
//!
//! # HTTP endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | any    | `/mcp` | MCP streamable HTTP endpoint |
//! | `GET`  | `/tools/list` | List all registered tools with schemas |
//! | `POST` | `/tools/{name}` | Call a tool by name |
//! | `GET`  | `/health` | Health check (returns version and backend status) |
//!
//! # Error Contract
//!
//! REST errors use a single shape:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "invalid arguments for keyword_search: ..." } }
//! ```
//!
//! Search failures are not HTTP errors: the tool still answers `200` with
//! the diagnostic text in `result`.
//!
//! # Client configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "azure-search": {
//!       "command": "azure-search-mcp",
//!       "args": ["serve"],
//!       "env": {
//!         "AZURE_SEARCH_ENDPOINT": "https://<service>.search.windows.net",
//!         "AZURE_SEARCH_INDEX_NAME": "<index>",
//!         "AZURE_SEARCH_API_KEY": "<key>"
//!       }
//!     }
//!   }
//! }
//! ```

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use rmcp::ServiceExt;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::client::ClientState;
use crate::config::Config;
use crate::mcp::McpBridge;
use crate::traits::{ToolContext, ToolRegistry};

/// Shared state passed to the REST handlers.
#[derive(Clone)]
struct AppState {
    tools: Arc<ToolRegistry>,
    ctx: ToolContext,
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn run_stdio(state: Arc<ClientState>) -> anyhow::Result<()> {
    let bridge = McpBridge::new(
        Arc::new(ToolRegistry::with_builtins()),
        ToolContext::new(state),
    );

    tracing::info!("MCP server starting on stdio");

    let server = bridge
        .serve(rmcp::transport::io::stdio())
        .await
        .map_err(|e| anyhow::anyhow!("failed to start MCP server: {}", e))?;

    server.waiting().await.context("MCP server error")?;

    tracing::info!("MCP server shutting down");
    Ok(())
}

/// Serve MCP and the REST tool routes on `[server].bind`.
///
/// Runs until the process is terminated.
pub async fn run_http(config: &Config, state: Arc<ClientState>) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!(bind = %bind_addr, "MCP server listening on http://{}/mcp", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the HTTP router. Exposed so tests can serve it on their own listener.
pub fn router(state: Arc<ClientState>) -> Router {
    let tools = Arc::new(ToolRegistry::with_builtins());
    let ctx = ToolContext::new(state);

    let factory_tools = tools.clone();
    let factory_ctx = ctx.clone();
    let mcp_service = StreamableHttpService::new(
        move || Ok(McpBridge::new(factory_tools.clone(), factory_ctx.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tools/list", get(handle_list_tools))
        .route("/tools/{name}", post(handle_tool_call))
        .route("/health", get(handle_health))
        .with_state(AppState { tools, ctx })
        .nest_service("/mcp", mcp_service)
        .layer(cors)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    /// Whether the search backend was configured at startup.
    backend_ready: bool,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend_ready: state.ctx.gateway().state().is_ready(),
    })
}

// ============ GET /tools/list ============

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Serialize)]
struct ToolListResponse {
    tools: Vec<ToolInfo>,
}

async fn handle_list_tools(State(state): State<AppState>) -> Json<ToolListResponse> {
    let tools = state
        .tools
        .tools()
        .iter()
        .map(|t| ToolInfo {
            name: t.name().to_string(),
            description: t.description().to_string(),
            parameters: t.parameters_schema(),
        })
        .collect();

    Json(ToolListResponse { tools })
}

// ============ POST /tools/{name} ============

/// Returns `404` for an unknown tool and `400` when the arguments do not
/// parse; otherwise `200` with the tool's text in `result`.
async fn handle_tool_call(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(params): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tool = state
        .tools
        .find(&name)
        .ok_or_else(|| not_found(format!("no tool registered with name: {}", name)))?;

    let result = tool
        .execute(params, &state.ctx)
        .await
        .map_err(|e| bad_request(e.to_string()))?;

    Ok(Json(serde_json::json!({ "result": result })))
}
