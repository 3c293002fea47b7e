//! Mavenlink endpoint registry.
//!
//! Maps each logical resource to its path under the API base URL and builds
//! absolute request URLs with encoded query parameters.

use std::fmt;

use reqwest::Url;

use super::error::{ApiError, Result};

/// A Mavenlink collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Workspaces (projects).
    Workspaces,
    /// Stories (tasks, sub-tasks and issues).
    Stories,
    /// Logged time.
    TimeEntries,
    /// Account users.
    Users,
}

impl Endpoint {
    /// The logical resource name, also used as the collection key in responses.
    pub fn resource(&self) -> &'static str {
        match self {
            Endpoint::Workspaces => "workspaces",
            Endpoint::Stories => "stories",
            Endpoint::TimeEntries => "time_entries",
            Endpoint::Users => "users",
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Workspaces => "workspaces.json",
            Endpoint::Stories => "stories.json",
            Endpoint::TimeEntries => "time_entries.json",
            Endpoint::Users => "users.json",
        }
    }

    /// Build the absolute URL for this endpoint.
    ///
    /// The base URL may or may not end in `/`. Query parameters are
    /// form-encoded in the given order; no `?` is emitted when there are none.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn url(&self, base_url: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{}: cannot be used as a base URL",
                base_url
            )));
        }

        let path = format!("{}/{}", url.path().trim_end_matches('/'), self.path());
        url.set_path(&path);
        url.set_query(None);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }

        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource())
    }
}
