//! Common types used throughout windowfetch
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single provider record: an arbitrarily nested JSON value
pub type Record = JsonValue;

/// Opaque header bag passed verbatim on every request
pub type HeaderBag = HashMap<String, String>;

/// Default wire format for window bounds (`2023-01-01T00:00:00Z`)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ============================================================================
// HTTP Method
// ============================================================================

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// JSON body carrying the filter and cursor (most provider methods)
    #[default]
    Post,
    /// No body; lookups such as the warehouse list
    Get,
}

// ============================================================================
// Collision Policy
// ============================================================================

/// What to do when a promoted key already exists in the target record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Fail with `Error::KeyCollision`
    #[default]
    Error,
    /// Later value replaces the earlier one
    Overwrite,
    /// Keep both, renaming the newcomer to `key_1`, `key_2`, ...
    Suffix,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}
