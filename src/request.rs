//! Request body builders
//!
//! A request builder turns a window into the JSON body for the first page of
//! that window. Pagination fields are merged in afterwards by the fetch loop.

use crate::error::{Error, Result};
use crate::partition::Window;
use crate::types::{JsonValue, DEFAULT_DATE_FORMAT};
use serde::{Deserialize, Serialize};

/// Builds the request body for a window
pub trait RequestBuilder: Send + Sync {
    /// Body for `window`, or for an unwindowed request when `None`
    fn build(&self, window: Option<&Window>) -> Result<JsonValue>;
}

/// A JSON body template with the window bounds written at JSON pointers
///
/// ```
/// use serde_json::json;
/// use windowfetch::request::{RequestBuilder, WindowBody};
///
/// let body = WindowBody::new(json!({"dir": "ASC", "filter": {"status": ""}}))
///     .with_bounds("/filter/since", "/filter/to");
/// assert_eq!(body.build(None).unwrap()["dir"], "ASC");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowBody {
    /// Fixed body fields
    #[serde(default = "empty_object")]
    pub template: JsonValue,
    /// Pointer receiving the window start (e.g., `/filter/since`)
    #[serde(default)]
    pub since_pointer: Option<String>,
    /// Pointer receiving the window end
    #[serde(default)]
    pub to_pointer: Option<String>,
    /// chrono format for the bounds
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn empty_object() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for WindowBody {
    fn default() -> Self {
        Self::new(empty_object())
    }
}

impl WindowBody {
    /// Create a builder from a template, without window bounds
    pub fn new(template: JsonValue) -> Self {
        Self {
            template,
            since_pointer: None,
            to_pointer: None,
            date_format: default_date_format(),
        }
    }

    /// Set the pointers receiving the window bounds
    #[must_use]
    pub fn with_bounds(mut self, since: impl Into<String>, to: impl Into<String>) -> Self {
        self.since_pointer = Some(since.into());
        self.to_pointer = Some(to.into());
        self
    }

    /// Set the bound format
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

impl RequestBuilder for WindowBody {
    fn build(&self, window: Option<&Window>) -> Result<JsonValue> {
        let mut body = self.template.clone();
        if !body.is_object() {
            return Err(Error::invalid_value(
                "body",
                "request body template must be a JSON object",
            ));
        }

        if let Some(window) = window {
            let (since, to) = window.format_bounds(&self.date_format);
            if let Some(pointer) = &self.since_pointer {
                set_pointer(&mut body, pointer, JsonValue::String(since))?;
            }
            if let Some(pointer) = &self.to_pointer {
                set_pointer(&mut body, pointer, JsonValue::String(to))?;
            }
        }

        Ok(body)
    }
}

/// Write `value` at a JSON pointer, creating missing objects on the way
pub fn set_pointer(target: &mut JsonValue, pointer: &str, value: JsonValue) -> Result<()> {
    let Some(path) = pointer.strip_prefix('/') else {
        return Err(Error::invalid_value(
            "pointer",
            format!("'{pointer}' must start with '/'"),
        ));
    };

    let mut current = target;
    let mut parts = path.split('/').map(|p| p.replace("~1", "/").replace("~0", "~"));
    let mut key = parts.next().unwrap_or_default();

    for next in parts {
        let JsonValue::Object(map) = current else {
            return Err(Error::invalid_value(
                "pointer",
                format!("'{pointer}' passes through a non-object"),
            ));
        };
        current = map.entry(key).or_insert_with(empty_object);
        key = next;
    }

    match current {
        JsonValue::Object(map) => {
            map.insert(key, value);
            Ok(())
        }
        _ => Err(Error::invalid_value(
            "pointer",
            format!("'{pointer}' passes through a non-object"),
        )),
    }
}
