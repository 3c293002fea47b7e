//! Mavenlink API client implementation.
//!
//! This module provides the transport used by the aggregator: one
//! authenticated HTTP round trip per call, with provider status codes
//! classified into success, empty, or error.

use std::time::Duration;

use reqwest::{header, Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use super::auth::Auth;
use super::endpoint::Endpoint;
use super::error::{ApiError, Result};
use crate::config::EnvironmentConfiguration;

/// Request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client identifier sent with every request.
const USER_AGENT: &str = "mavenlink-communicator/1.0";

/// The Mavenlink API client.
///
/// Sends exactly one request per call. There is no retry: a timeout or
/// connection failure is returned to the caller as `ApiError::Transport`.
#[derive(Debug, Clone)]
pub struct MavenlinkClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL, as configured.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl MavenlinkClient {
    /// Create a new client from the environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &EnvironmentConfiguration) -> Result<Self> {
        let client = Self::build_http_client(config.insecure_skip_verify)?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            auth: Auth::new(&config.token),
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client(insecure_skip_verify: bool) -> Result<Client> {
        if insecure_skip_verify {
            warn!("TLS certificate validation is disabled for the Mavenlink client");
        }

        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(insecure_skip_verify)
            .build()
            .map_err(ApiError::Transport)
    }

    /// Build the absolute URL of an endpoint under this client's base URL.
    pub fn endpoint_url(&self, endpoint: Endpoint, query: &[(&str, &str)]) -> Result<Url> {
        endpoint.url(&self.base_url, query)
    }

    /// GET a collection endpoint.
    ///
    /// Returns `Ok(None)` when the provider answers 204 No Content.
    #[instrument(skip(self, query), fields(endpoint = %endpoint))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = self.endpoint_url(endpoint, query)?;
        self.perform(Method::GET, url, None).await
    }

    /// Perform a single request and decode the response.
    ///
    /// `body`, when present, is sent as JSON.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn perform<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<T>> {
        debug!(%method, "Sending request");

        let mut request = self
            .client
            .request(method, url.clone())
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            ApiError::Transport(e)
        })?;

        Self::handle_response(response).await
    }

    /// Classify the response status and decode the body.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        if let Some(err) = ApiError::from_status(status) {
            error!("Mavenlink returned {} for {}", status, response.url());
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        let decoded = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            warn!("Failed to decode response body: {}", e);
            ApiError::Decode(e)
        })?;

        Ok(Some(decoded))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
