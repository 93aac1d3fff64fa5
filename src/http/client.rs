//! HTTP client for provider requests
//!
//! Wraps a `reqwest::Client` with:
//! - A base URL for relative endpoint paths
//! - Default headers (the credential bag) on every request
//! - A per-request timeout
//! - Classification of transport failures

use super::transport::{JsonResponse, Transport};
use crate::error::{Error, Result};
use crate::types::HeaderBag;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative request paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HeaderBag,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: HeaderBag::new(),
            user_agent: format!("windowfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Add every header from a bag
    pub fn headers(mut self, headers: &HeaderBag) -> Self {
        self.config
            .default_headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client shared by all fetch tasks
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    fn classify(&self, url: &str, err: &reqwest::Error) -> Error {
        if err.is_timeout() {
            #[allow(clippy::cast_possible_truncation)]
            return Error::Timeout {
                url: url.to_string(),
                timeout_ms: self.config.timeout.as_millis() as u64,
            };
        }
        Error::connection(url, err.to_string())
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<JsonResponse> {
        let full_url = self.build_url(url);
        let req = self.client.post(&full_url).json(body);
        self.send(&full_url, req).await
    }

    async fn get_json(&self, url: &str) -> Result<JsonResponse> {
        let full_url = self.build_url(url);
        let req = self.client.get(&full_url);
        self.send(&full_url, req).await
    }

    fn resolve_url(&self, url: &str) -> String {
        self.build_url(url)
    }
}

impl HttpClient {
    async fn send(&self, full_url: &str, mut req: RequestBuilder) -> Result<JsonResponse> {
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await.map_err(|e| self.classify(full_url, &e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.classify(full_url, &e))?;

        debug!(url = %full_url, status = status.as_u16(), bytes = text.len(), "Request completed");

        match serde_json::from_str::<Value>(&text) {
            Ok(body) => Ok(JsonResponse::new(status.as_u16(), body)),
            Err(_) if !status.is_success() => {
                Ok(JsonResponse::new(status.as_u16(), Value::String(text)))
            }
            Err(e) => Err(Error::decode(format!(
                "Failed to parse JSON from {full_url}: {e}"
            ))),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("headers", &self.config.default_headers.len())
            .finish_non_exhaustive()
    }
}
