//! Configuration management for the communicator.
//!
//! The configuration is read once at startup, either from the process
//! environment or from a TOML file, and is never mutated afterwards.

mod environment;

use std::path::PathBuf;

use thiserror::Error;

pub use environment::EnvironmentConfiguration;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "MAVENLINK_COMMUNICATOR_";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("required environment variable {0} is not set")]
    MissingVariable(String),

    /// An environment variable holds a value that cannot be parsed.
    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidVariable {
        /// The variable name.
        name: String,
        /// The offending value.
        value: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
