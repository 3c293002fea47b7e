//! Centralized error types for the communicator.
//!
//! This module provides the application error hierarchy and the single
//! boundary where internal errors are turned into caller-facing
//! [`ErrorResponse`] values.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// Code carried by every caller-facing error.
pub const ERROR_CODE: i32 = 400;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, stdout, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// Used for startup failures, which are always reported in full to the
    /// operator regardless of the debug flag.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::MissingVariable(name) => {
                    format!("Configuration missing: set {} before starting.", name)
                }
                ConfigError::InvalidVariable { name, value } => {
                    format!("Configuration error: {} cannot be '{}'.", name, value)
                }
                ConfigError::ReadError { path, .. } => format!(
                    "Could not read configuration file {}. Check the file exists and is readable.",
                    path.display()
                ),
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::InvalidUrl(_) => "Invalid Mavenlink URL in configuration.".to_string(),
                ApiError::HttpStatus { status: 401, .. } => {
                    "Authentication failed. Please check your API token.".to_string()
                }
                ApiError::HttpStatus { status: 403, .. } => {
                    "Access denied. The token cannot access this resource.".to_string()
                }
                ApiError::HttpStatus { status, reason } => {
                    format!("Mavenlink returned {} {}.", status, reason)
                }
                ApiError::Transport(_) => {
                    "Could not reach Mavenlink. Please check your URL and network.".to_string()
                }
                ApiError::Decode(_) | ApiError::MissingCollection(_) => {
                    "Unexpected response from Mavenlink.".to_string()
                }
                ApiError::CountMismatch { .. } => {
                    "Mavenlink returned an inconsistent project listing.".to_string()
                }
            },
            AppError::Io(_) => "An IO operation failed.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if retrying the same call later could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::Transport(_))
                | AppError::Api(ApiError::HttpStatus { status: 500, .. })
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// The uniform error object returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always [`ERROR_CODE`].
    pub code: i32,
    /// Raw error text in debug mode, otherwise a fixed message.
    pub description: String,
}

impl ErrorResponse {
    /// Format an error for a caller.
    ///
    /// The underlying error text is disclosed only when `debug` is set;
    /// otherwise `message` is used verbatim.
    pub fn format(err: &dyn fmt::Display, debug: bool, message: &str) -> Self {
        let description = if debug {
            err.to_string()
        } else {
            message.to_string()
        };
        Self {
            code: ERROR_CODE,
            description,
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.code, self.description)
    }
}
