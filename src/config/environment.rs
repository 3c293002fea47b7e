//! Environment configuration for the Mavenlink connection.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result, ENV_PREFIX};

/// Connection settings for the Mavenlink API.
///
/// Built once at startup and handed by value to the aggregator.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentConfiguration {
    /// The Mavenlink API base URL (e.g., "https://api.mavenlink.com/api/v1/").
    pub url: String,

    /// The OAuth bearer token.
    pub token: String,

    /// Whether raw error details are disclosed to callers.
    #[serde(default)]
    pub debug: bool,

    /// Accept any TLS certificate presented by the provider.
    ///
    /// Only for self-hosted gateways with private certificates.
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

impl EnvironmentConfiguration {
    /// Create a configuration with certificate validation enabled.
    pub fn new(url: impl Into<String>, token: impl Into<String>, debug: bool) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            debug,
            insecure_skip_verify: false,
        }
    }

    /// Load the configuration from `MAVENLINK_COMMUNICATOR_*` environment variables.
    ///
    /// `URL` and `TOKEN` are required; `DEBUG` and `INSECURE_SKIP_VERIFY`
    /// default to `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a flag cannot be
    /// parsed, or validation fails.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            url: required_var("URL")?,
            token: required_var("TOKEN")?,
            debug: flag_var("DEBUG")?,
            insecure_skip_verify: flag_var("INSECURE_SKIP_VERIFY")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or validation fails.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate this configuration.
    ///
    /// Checks that:
    /// - The URL is non-empty and uses http or https
    /// - The token is non-empty
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "URL cannot be empty".to_string(),
            ));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "URL '{}' must start with http:// or https://",
                self.url
            )));
        }

        if self.token.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "token cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for EnvironmentConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentConfiguration")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("debug", &self.debug)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .finish()
    }
}

/// Read a required, non-empty variable.
fn required_var(key: &str) -> Result<String> {
    let name = format!("{}{}", ENV_PREFIX, key);
    match std::env::var(&name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable(name)),
    }
}

/// Read an optional boolean variable.
fn flag_var(key: &str) -> Result<bool> {
    let name = format!("{}{}", ENV_PREFIX, key);
    match std::env::var(&name) {
        Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidVariable { name, value }),
        Err(_) => Ok(false),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" | "" => Some(false),
        _ => None,
    }
}
