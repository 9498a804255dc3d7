// Error types module

use thiserror::Error;

use crate::remote::RemoteError;

/// Centralized error type for the utility layer
///
/// Conversion errors wrap the parser error unmodified. Remote errors keep
/// the full [`RemoteError`] so callers (and the retry wrapper) can inspect
/// the API error code.
#[derive(Error, Debug)]
pub enum CfnSphereError {
    /// Malformed YAML input, or YAML output that could not be rendered
    #[error("YAML conversion error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed JSON input, or a document JSON cannot represent
    #[error("JSON conversion error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML value with no JSON representation (infinite or NaN floats)
    #[error("Value cannot be represented as JSON: {0}")]
    Unrepresentable(String),

    /// The server did not send a usable `Date` header
    #[error("Could not determine remote server time: {0}")]
    TimestampUnavailable(String),

    /// The `Date` header was present but not an HTTP date
    #[error("Invalid server timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Transport failure while talking to the remote endpoint
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Error reported by the cloud API
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Invalid configuration (bad YAML, missing env vars, invalid values)
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T, E = CfnSphereError> = std::result::Result<T, E>;
