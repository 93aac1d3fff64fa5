//! Decoder types and traits

use crate::error::Result;
use serde_json::Value;

/// Trait for extracting records from a response body
pub trait RecordDecoder: Send + Sync {
    /// Extract the records carried by a response
    fn decode(&self, body: &Value) -> Result<Vec<Value>>;
}
