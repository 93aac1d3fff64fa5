//! Transport abstraction

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

/// A decoded provider response
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed body; a non-JSON error body is kept as a string
    pub body: Value,
}

impl JsonResponse {
    /// Create a new response
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// A 200 response with the given body
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }
}

/// Sends a JSON body and returns the JSON response
///
/// Implementations are shared read-only by every concurrent fetch task.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` (absolute, or relative to the base URL)
    async fn post_json(&self, url: &str, body: &Value) -> Result<JsonResponse>;

    /// GET `url` and parse the JSON response
    async fn get_json(&self, url: &str) -> Result<JsonResponse> {
        Err(Error::config(format!("GET is not supported for {url}")))
    }

    /// The URL a request to `url` is actually sent to
    fn resolve_url(&self, url: &str) -> String {
        url.to_string()
    }
}
