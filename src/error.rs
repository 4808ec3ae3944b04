//! Error types for the search gateway.
//!
//! The core never lets these escape to a caller of a search operation:
//! [`ConfigError`] turns into the degraded [`ClientState::Unavailable`]
//! state at startup, and [`SearchError`] is converted into a diagnostic
//! string by the [`gateway`](crate::gateway).
//!
//! [`ClientState::Unavailable`]: crate::client::ClientState::Unavailable

use thiserror::Error;

/// Failure to build a usable backend client from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required settings were absent or blank.
    ///
    /// Holds every missing setting, in declaration order.
    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),

    /// The HTTP client could not be constructed or the endpoint is not a URL.
    #[error("Failed to create Azure Search client: {0}")]
    Client(String),
}

/// Failure of a single search call.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The backend client was never initialized.
    #[error("{0}")]
    Unavailable(String),

    /// The request did not reach the service or the connection broke.
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Azure Search returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON shape.
    #[error("malformed search response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Malformed(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_lists_every_name() {
        let err = ConfigError::MissingSettings(vec!["AZURE_SEARCH_ENDPOINT", "AZURE_SEARCH_API_KEY"]);
        assert_eq!(
            err.to_string(),
            "Missing required configuration: AZURE_SEARCH_ENDPOINT, AZURE_SEARCH_API_KEY"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = SearchError::Status {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "Azure Search returned 403: Forbidden");
    }
}
