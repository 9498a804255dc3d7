//! Remote cloud-API error descriptor
//!
//! [`RemoteError`] is the typed form of an error returned by the
//! CloudFormation API: an HTTP status, a machine-readable error code and a
//! human-readable message. The retry wrapper only looks at the code.
//!
//! Errors coming straight from the AWS SDK can be converted with
//! [`RemoteError::from_sdk_error`], or classified in place since
//! [`SdkError`] implements [`Throttling`](crate::retry::Throttling) as well.

use aws_sdk_cloudformation::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

use crate::constants::THROTTLING_ERROR_CODE;

/// Error reported by the remote cloud API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct RemoteError {
    /// HTTP status of the failed response, when one was received
    pub status: Option<u16>,
    /// Machine-readable error code (e.g. `Throttling`, `ValidationError`)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl RemoteError {
    /// Create a remote error for a response with the given HTTP status
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Build a descriptor from an AWS SDK error
    ///
    /// Missing metadata (e.g. a dispatch failure that never reached the API)
    /// yields an empty code, which never classifies as throttling.
    pub fn from_sdk_error<E, R>(err: &SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata,
        R: HttpStatus,
    {
        Self {
            status: err.raw_response().map(HttpStatus::status_code),
            code: err.code().unwrap_or_default().to_string(),
            message: err.message().unwrap_or_default().to_string(),
        }
    }

    /// True if the API rejected the call because of rate limiting
    pub fn is_throttling(&self) -> bool {
        self.code == THROTTLING_ERROR_CODE
    }

    /// True if the status marks a client-request (4xx) error
    pub fn is_client_error(&self) -> bool {
        matches!(self.status, Some(400..=499))
    }
}

/// Access to the HTTP status of a raw SDK response
pub trait HttpStatus {
    fn status_code(&self) -> u16;
}

impl HttpStatus for aws_sdk_cloudformation::config::http::HttpResponse {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }
}
