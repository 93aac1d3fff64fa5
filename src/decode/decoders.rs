//! Decoder implementations

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Path to the record list
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a decoder that treats the whole response as records
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Configured record path, if any
    pub fn record_path(&self) -> Option<&str> {
        self.record_path.as_deref()
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &Value) -> Result<Vec<Value>> {
        let found = match &self.record_path {
            Some(path) => extract_path(body, path).ok_or_else(|| Error::RecordExtraction {
                path: path.clone(),
                message: "path not present in response".to_string(),
            })?,
            None => body,
        };

        Ok(match found {
            Value::Array(items) => items.clone(),
            Value::Null => Vec::new(),
            other => vec![other.clone()],
        })
    }
}

// ============================================================================
// Path Extraction
// ============================================================================

/// Resolve a dot-notation path against a JSON value
///
/// Supports a leading `$.`, object keys, and `[n]` / `[-n]` indices.
/// An empty path or `$` returns the value itself.
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match part.find('[') {
            Some(bracket_pos) => {
                let name = &part[..bracket_pos];
                let index_str = part[bracket_pos + 1..].strip_suffix(']')?;

                if !name.is_empty() {
                    current = current.get(name)?;
                }

                let index: i64 = index_str.parse().ok()?;
                let Value::Array(arr) = current else {
                    return None;
                };
                let idx = if index < 0 {
                    arr.len().checked_sub(usize::try_from(index.unsigned_abs()).ok()?)?
                } else {
                    usize::try_from(index).ok()?
                };
                current = arr.get(idx)?;
            }
            None => current = current.get(part)?,
        }
    }

    Some(current)
}
