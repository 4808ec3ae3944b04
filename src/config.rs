use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

pub const ENDPOINT_VAR: &str = "AZURE_SEARCH_ENDPOINT";
pub const INDEX_NAME_VAR: &str = "AZURE_SEARCH_INDEX_NAME";
pub const API_KEY_VAR: &str = "AZURE_SEARCH_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub azure: AzureConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Connection settings for the Azure AI Search service.
///
/// The three required settings are optional here so that a partial
/// configuration still parses; [`AzureConfig::validate`] decides whether
/// the service is usable.
#[derive(Debug, Deserialize, Clone)]
pub struct AzureConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub index_name: Option<String>,
    #[serde(default)]
    pub api_key: Option<ApiKey>,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_vector_field")]
    pub vector_field: String,
    #[serde(default)]
    pub semantic_configuration: Option<String>,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            index_name: None,
            api_key: None,
            api_version: default_api_version(),
            vector_field: default_vector_field(),
            semantic_configuration: None,
        }
    }
}

fn default_api_version() -> String {
    "2024-07-01".to_string()
}
fn default_vector_field() -> String {
    "text_vector".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

/// Access credential for the search service. `Debug` never shows the key.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// A fully validated connection target.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub endpoint: String,
    pub index_name: String,
    pub api_key: ApiKey,
    pub api_version: String,
    pub vector_field: String,
    pub semantic_configuration: Option<String>,
}

/// Settings supplied on the command line or through the environment.
///
/// Each present value replaces the one read from the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub index_name: Option<String>,
    pub api_key: Option<String>,
    pub bind: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AzureConfig {
    /// Check that endpoint, index name, and key are all present.
    ///
    /// Blank values count as missing. On failure the error names every
    /// missing setting, not just the first.
    pub fn validate(&self) -> Result<SearchSettings, ConfigError> {
        let endpoint = present(self.endpoint.as_deref());
        let index_name = present(self.index_name.as_deref());
        let api_key = present(self.api_key.as_ref().map(ApiKey::expose));

        let mut missing = Vec::new();
        if endpoint.is_none() {
            missing.push(ENDPOINT_VAR);
        }
        if index_name.is_none() {
            missing.push(INDEX_NAME_VAR);
        }
        if api_key.is_none() {
            missing.push(API_KEY_VAR);
        }

        match (endpoint, index_name, api_key) {
            (Some(endpoint), Some(index_name), Some(api_key)) => Ok(SearchSettings {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                index_name: index_name.to_string(),
                api_key: ApiKey::new(api_key),
                api_version: self.api_version.clone(),
                vector_field: self.vector_field.clone(),
                semantic_configuration: self
                    .semantic_configuration
                    .as_deref()
                    .and_then(|s| present(Some(s)))
                    .map(str::to_string),
            }),
            _ => Err(ConfigError::MissingSettings(missing)),
        }
    }
}

impl Config {
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.azure.endpoint = Some(endpoint);
        }
        if let Some(index_name) = overrides.index_name {
            self.azure.index_name = Some(index_name);
        }
        if let Some(api_key) = overrides.api_key {
            self.azure.api_key = Some(ApiKey::new(api_key));
        }
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }
    }
}

/// Read the optional TOML config file.
///
/// With no path, every setting starts at its default and the required
/// values must come from [`Overrides`].
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }
    if config.azure.vector_field.trim().is_empty() {
        anyhow::bail!("azure.vector_field must not be empty");
    }

    Ok(config)
}
