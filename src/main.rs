//! # Azure Search MCP CLI (`azure-search-mcp`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `azure-search-mcp serve` | Start the MCP server (stdio by default) |
//! | `azure-search-mcp search "<query>"` | Run one search and print the report |
//! | `azure-search-mcp tools` | List the available tools |
//!
//! The endpoint, index name, and API key come from `--endpoint`,
//! `--index-name`, and `--api-key`, the `AZURE_SEARCH_*` environment
//! variables, or the `[azure]` table of an optional TOML file passed with
//! `--config`. Missing settings do not stop the process: the server still
//! starts and every search reports that the client is not initialized.
//!
//! Logs go to stderr; stdout is reserved for results and the stdio
//! JSON-RPC stream.

use azure_search_mcp::client::ClientState;
use azure_search_mcp::config::{self, Overrides};
use azure_search_mcp::gateway::SearchGateway;
use azure_search_mcp::search::{SearchMode, SearchRequest, DEFAULT_TOP};
use azure_search_mcp::server;
use azure_search_mcp::traits::ToolRegistry;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// MCP server for keyword, vector, and hybrid search over Azure AI Search.
#[derive(Parser)]
#[command(name = "azure-search-mcp", version)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search service endpoint, e.g. `https://<service>.search.windows.net`.
    #[arg(long, global = true, env = "AZURE_SEARCH_ENDPOINT")]
    endpoint: Option<String>,

    /// Name of the index to search.
    #[arg(long, global = true, env = "AZURE_SEARCH_INDEX_NAME")]
    index_name: Option<String>,

    /// Query or admin API key for the service.
    #[arg(long, global = true, env = "AZURE_SEARCH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server.
    Serve {
        /// Transport to serve MCP on.
        #[arg(long, value_enum, default_value_t = Transport::Stdio)]
        transport: Transport,

        /// Address for the HTTP transport; overrides `[server].bind`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Run a single search and print the report to stdout.
    Search {
        /// The search query string.
        query: String,

        /// Search mode: `keyword`, `vector`, or `hybrid`.
        #[arg(long, default_value = "keyword")]
        mode: SearchMode,

        /// Number of results to return.
        #[arg(long, default_value_t = DEFAULT_TOP as i64)]
        top: i64,

        /// OData filter expression.
        #[arg(long)]
        filter: Option<String>,
    },

    /// List the available tools.
    Tools,
}

#[derive(Clone, Copy, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Commands::Tools = cli.command {
        for tool in ToolRegistry::with_builtins().tools() {
            println!("{}: {}", tool.name(), tool.description());
        }
        return Ok(());
    }

    let mut cfg = config::load_config(cli.config.as_deref())?;
    let bind = match &cli.command {
        Commands::Serve { bind, .. } => bind.clone(),
        _ => None,
    };
    cfg.apply_overrides(Overrides {
        endpoint: cli.endpoint,
        index_name: cli.index_name,
        api_key: cli.api_key,
        bind,
    });

    let state = Arc::new(ClientState::initialize(&cfg.azure));

    match cli.command {
        Commands::Serve { transport, .. } => match transport {
            Transport::Stdio => server::run_stdio(state).await?,
            Transport::Http => server::run_http(&cfg, state).await?,
        },
        Commands::Search {
            query,
            mode,
            top,
            filter,
        } => {
            let gateway = SearchGateway::new(state);
            let request = SearchRequest::new(mode, query, top).with_filter(filter);
            println!("{}", gateway.run(request).await);
        }
        Commands::Tools => {}
    }

    Ok(())
}
