//! # Azure Search MCP
//!
//! An MCP server that exposes an Azure AI Search index to AI agents
//! through three tools: `keyword_search`, `vector_search`, and
//! `hybrid_search`. Each tool returns a markdown report, or a diagnostic
//! string when the search cannot be performed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌──────────┐   ┌───────────┐
//! │  config  │──▶│  ClientState  │──▶│  search  │──▶│   Azure   │
//! │ validate │   │ Ready/Unavail.│   │ dispatch │   │ AI Search │
//! └──────────┘   └───────┬───────┘   └────┬─────┘   └───────────┘
//!                        │                ▼
//!                        │          ┌───────────┐   ┌──────────┐
//!                        └─────────▶│  gateway  │──▶│  render  │
//!                                   │ normalize │   │ markdown │
//!                                   └─────┬─────┘   └──────────┘
//!                                         ▼
//!                                 ┌──────────────┐
//!                                 │ MCP (stdio / │
//!                                 │    HTTP)     │
//!                                 └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export AZURE_SEARCH_ENDPOINT=https://my-service.search.windows.net
//! export AZURE_SEARCH_INDEX_NAME=docs
//! export AZURE_SEARCH_API_KEY=...
//! azure-search-mcp search "neural networks" --mode hybrid
//! azure-search-mcp serve                        # MCP over stdio
//! azure-search-mcp serve --transport http       # MCP over HTTP
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML/env configuration and validation |
//! | [`client`] | Backend client and startup state |
//! | [`search`] | Search strategies and request shaping |
//! | [`normalize`] | Canonical result records |
//! | [`render`] | Markdown reports |
//! | [`gateway`] | The three search operations |
//! | [`traits`] | Tool trait and registry |
//! | [`mcp`] | MCP protocol bridge |
//! | [`server`] | stdio and HTTP transports |
//! | [`error`] | Error types |

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mcp;
pub mod normalize;
pub mod render;
pub mod search;
pub mod server;
pub mod traits;
