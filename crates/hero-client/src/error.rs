//! Superhero client error types.

use hero_core::ValidationError;
use hero_schema::ErrorShape;

/// Errors from superhero API calls.
///
/// `endpoint` labels never contain the access token.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Non-2xx status with a body that is not JSON.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body is not JSON.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// The API answered with one of its known error bodies.
    #[error("{endpoint} returned error body: {shape}")]
    Api {
        endpoint: String,
        shape: ErrorShape,
    },
    /// Success body failed schema validation.
    #[error("invalid search response: {0}")]
    Validation(#[from] ValidationError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
