//! API error types for the Mavenlink client.

use thiserror::Error;

/// Status codes the provider uses to signal a failed request.
///
/// Any other status falls through to body decoding.
const FAILURE_STATUSES: [u16; 5] = [400, 401, 403, 404, 500];

/// Errors that can occur when talking to the Mavenlink API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The provider answered with one of the failure statuses.
    #[error("HTTP {status} {reason}")]
    HttpStatus {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// The request never produced a status (connect, TLS, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The expected collection was absent from an otherwise valid response.
    #[error("Failed to retrieve response from {0} endpoint")]
    MissingCollection(&'static str),

    /// Fewer (or more) workspaces were mapped than the provider declared.
    #[error(
        "Mismatch found between processed ({mapped}) and retrieved ({declared}) count. Failed to retrieve all Projects!"
    )]
    CountMismatch {
        /// Count declared by the provider.
        declared: u64,
        /// Count of entries that passed the key/id check.
        mapped: u64,
    },
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Classify an HTTP status.
    ///
    /// Returns `Some` for the statuses the provider uses to report failure and
    /// `None` for everything else.
    pub fn from_status(status: reqwest::StatusCode) -> Option<Self> {
        if FAILURE_STATUSES.contains(&status.as_u16()) {
            Some(ApiError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            })
        } else {
            None
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
