//! Error types for ACME webhook solvers
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for webhook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the webhook
#[derive(Error, Debug)]
pub enum Error {
    /// The per-challenge solver config could not be decoded
    #[error("error decoding solver config: {0}")]
    ConfigDecode(String),

    /// The outbound HTTP request could not be built
    #[error("unable to execute request {0}")]
    RequestConstruction(String),

    /// Network, TLS or connection failure talking to the provider
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The provider answered with a status other than 200
    #[error("Error calling API status: {status} url: {url} method: {method}")]
    ProviderApi {
        /// Status line as reported by the transport (e.g. "400 Bad Request")
        status: String,
        /// Request URL
        url: String,
        /// HTTP method
        method: String,
    },

    /// Startup configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Kubernetes client construction errors
    #[error("Cluster client error: {0}")]
    Cluster(String),

    /// No solver registered under the requested name
    #[error("Unknown solver: {0}")]
    UnknownSolver(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config decode error
    pub fn config_decode(msg: impl Into<String>) -> Self {
        Self::ConfigDecode(msg.into())
    }

    /// Create a request construction error
    pub fn request_construction(msg: impl Into<String>) -> Self {
        Self::RequestConstruction(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a provider API error from a non-200 response
    pub fn provider_api(
        status: impl Into<String>,
        url: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self::ProviderApi {
            status: status.into(),
            url: url.into(),
            method: method.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a cluster client error
    pub fn cluster(msg: impl Into<String>) -> Self {
        Self::Cluster(msg.into())
    }

    /// Create an unknown solver error
    pub fn unknown_solver(name: impl Into<String>) -> Self {
        Self::UnknownSolver(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_api_message_carries_request_details() {
        let err = Error::provider_api(
            "401 Unauthorized",
            "https://api.example.com/zone/example.com/ns1",
            "PATCH",
        );

        assert_eq!(
            err.to_string(),
            "Error calling API status: 401 Unauthorized url: https://api.example.com/zone/example.com/ns1 method: PATCH"
        );
    }

    #[test]
    fn test_config_decode_message() {
        let err = Error::config_decode("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "error decoding solver config: expected value at line 1 column 1"
        );
    }
}
