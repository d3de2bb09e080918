/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for task service calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http::{Result, TaskboardError};

/// Local development endpoint of the task service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable that overrides the configured base URL
pub const BASE_URL_ENV: &str = "TASKBOARD_API_BASE";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the task service
#[derive(Debug, Clone)]
pub struct TaskboardClient {
    http_client: Client,
    base_url: Url,
}

impl TaskboardClient {
    /// Create a new client against the default base URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a client with custom configuration and base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint relative to the base URL
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build request builder for an endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        debug!(%method, %url, "building request");
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder for `tasks/{id}`, encoding the id as one path segment
    pub(crate) fn task_request(&self, method: Method, id: &str) -> Result<RequestBuilder> {
        if id.is_empty() {
            return Err(TaskboardError::Validation("task id must not be empty".to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TaskboardError::Config(format!("not a base URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("tasks")
            .push(id);
        debug!(%method, %url, "building request");
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode a JSON body from a 2xx response
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = Self::check_status(builder.send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            TaskboardError::InvalidResponse(format!("failed to decode response body: {err}"))
        })
    }

    /// Send a request and discard the body of a 2xx response
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        Self::check_status(builder.send().await?).await?;
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(TaskboardError::from_response_body(status, &body))
    }
}

/// Endpoints are joined relative to the base, so a path prefix on the base
/// (`http://host/api`) must end in `/` to survive the join.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskboardError::Config("base URL must not be empty".to_string()));
    }
    let mut url = Url::parse(trimmed)?;
    if url.cannot_be_a_base() {
        return Err(TaskboardError::Config(format!("not a base URL: {trimmed}")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
