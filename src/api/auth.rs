//! Authentication handling for the Mavenlink API.
//!
//! Mavenlink authenticates with an OAuth bearer token sent on every request.

use std::fmt;

/// Bearer-token credentials for Mavenlink.
#[derive(Clone)]
pub struct Auth {
    /// The complete "Bearer ..." header value.
    auth_header: String,
}

impl Auth {
    /// Create credentials from a raw API token.
    pub fn new(token: &str) -> Self {
        Self {
            auth_header: build_auth_header(token),
        }
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("auth_header", &"Bearer <redacted>")
            .finish()
    }
}

/// Build the Bearer header value.
fn build_auth_header(token: &str) -> String {
    format!("Bearer {}", token.trim())
}
