//! Provider error payload detection

use crate::error::{Error, Result};
use serde_json::Value;
use tracing::debug;

/// Fail when a response is a provider error
///
/// A response is an error when its status is not 2xx, or when the body
/// carries a non-empty top-level `message` field. The provider message is
/// surfaced; the full body only goes to the debug log.
pub fn check_remote_error(status: u16, api_method: &str, body: &Value) -> Result<()> {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty());

    let success = (200..300).contains(&status);
    if success && message.is_none() {
        return Ok(());
    }

    debug!(status, api_method, body = %body, "Provider returned an error");

    let message = match message {
        Some(m) => m.to_string(),
        None => match body {
            Value::String(s) if !s.is_empty() => s.clone(),
            _ => format!("request failed with status {status}"),
        },
    };

    Err(Error::remote(status, api_method, message))
}
