//! Backend client for the Azure AI Search REST API.
//!
//! [`ClientState`] is built once at startup from [`AzureConfig`] and shared
//! read-only by every operation. When validation fails the state is
//! [`ClientState::Unavailable`] for the life of the process; operations
//! check it before dispatching anything.
//!
//! The [`SearchBackend`] trait is the seam between request shaping and the
//! wire. [`AzureSearchClient`] is the production implementation; tests
//! substitute in-memory backends.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::{AzureConfig, SearchSettings};
use crate::error::{ConfigError, SearchError};
use crate::search::{BackendQuery, QueryOptions};

/// A single backend record, kept as its raw JSON object.
///
/// Only `title`, `chunk`, and `@search.score` are interpreted, by
/// [`normalize`](crate::normalize).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RawResult(pub serde_json::Map<String, serde_json::Value>);

impl RawResult {
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }
}

impl From<serde_json::Value> for RawResult {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => RawResult(map),
            _ => RawResult::default(),
        }
    }
}

/// A remote index that can execute search requests.
///
/// Implementations must be `Send + Sync`; one instance serves all
/// concurrent operation calls.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Request-shaping options for this index.
    fn query_options(&self) -> &QueryOptions;

    /// Execute one search request and return records in ranked order.
    ///
    /// `index` overrides the configured index for this call only.
    async fn search(
        &self,
        index: Option<&str>,
        query: &BackendQuery,
    ) -> Result<Vec<RawResult>, SearchError>;
}

/// Records are decoded one by one so a non-object entry defaults instead
/// of failing the whole response.
#[derive(Deserialize)]
struct SearchResponse {
    value: Vec<serde_json::Value>,
}

/// `reqwest`-based client for one search service.
pub struct AzureSearchClient {
    http: reqwest::Client,
    endpoint: reqwest::Url,
    index_name: String,
    api_key: crate::config::ApiKey,
    api_version: String,
    options: QueryOptions,
}

impl AzureSearchClient {
    pub fn new(settings: &SearchSettings) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        let endpoint = reqwest::Url::parse(&settings.endpoint).map_err(|e| {
            ConfigError::Client(format!("invalid endpoint {}: {}", settings.endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ConfigError::Client(format!(
                "invalid endpoint {}: not a base URL",
                settings.endpoint
            )));
        }

        Ok(Self {
            http,
            endpoint,
            index_name: settings.index_name.clone(),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
            options: QueryOptions::from(settings),
        })
    }

    /// `{endpoint}/indexes/{index}/docs/search`, with `index` escaped as one segment.
    fn search_url(&self, index: &str) -> reqwest::Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["indexes", index, "docs", "search"]);
        }
        url
    }
}

#[async_trait]
impl SearchBackend for AzureSearchClient {
    fn query_options(&self) -> &QueryOptions {
        &self.options
    }

    async fn search(
        &self,
        index: Option<&str>,
        query: &BackendQuery,
    ) -> Result<Vec<RawResult>, SearchError> {
        let url = self.search_url(index.unwrap_or(&self.index_name));
        let response = self
            .http
            .post(url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", self.api_key.expose())
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.value.into_iter().map(RawResult::from).collect())
    }
}

/// Pull `error.message` out of an Azure error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Availability of the backend, fixed at startup.
#[derive(Clone)]
pub enum ClientState {
    Ready(Arc<dyn SearchBackend>),
    Unavailable(String),
}

impl ClientState {
    /// Validate configuration and connect, or record why that was impossible.
    ///
    /// Never fails: a bad configuration becomes [`ClientState::Unavailable`]
    /// carrying the aggregated message.
    pub fn initialize(config: &AzureConfig) -> Self {
        let settings = match config.validate() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!(error = %e, "Azure Search client not initialized");
                return ClientState::Unavailable(e.to_string());
            }
        };

        tracing::info!(
            endpoint = %settings.endpoint,
            index = %settings.index_name,
            "Connecting to Azure AI Search"
        );

        match AzureSearchClient::new(&settings) {
            Ok(client) => ClientState::Ready(Arc::new(client)),
            Err(e) => {
                tracing::error!(error = %e, "Azure Search client not initialized");
                ClientState::Unavailable(e.to_string())
            }
        }
    }

    pub fn ready(backend: Arc<dyn SearchBackend>) -> Self {
        ClientState::Ready(backend)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ClientState::Ready(_))
    }

    /// The backend, or [`SearchError::Unavailable`] with the startup reason.
    pub fn backend(&self) -> Result<&dyn SearchBackend, SearchError> {
        match self {
            ClientState::Ready(backend) => Ok(backend.as_ref()),
            ClientState::Unavailable(reason) => Err(SearchError::Unavailable(reason.clone())),
        }
    }
}

impl std::fmt::Debug for ClientState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientState::Ready(_) => f.write_str("Ready"),
            ClientState::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
        }
    }
}
