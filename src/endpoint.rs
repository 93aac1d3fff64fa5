//! Endpoint definitions
//!
//! An endpoint bundles everything needed to fetch one provider method:
//! the URL, the body template, where the records live in the response,
//! how it paginates and how a date range is cut into windows.

use crate::decode::JsonDecoder;
use crate::error::{Error, Result};
use crate::pagination::PaginationConfig;
use crate::partition::WindowPolicy;
use crate::request::{set_pointer, WindowBody};
use crate::types::Method;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declarative description of a provider endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDefinition {
    /// Unique endpoint name
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// HTTP method
    #[serde(default)]
    pub method: Method,

    /// Absolute URL, or a path relative to the base URL
    pub url: String,

    /// Path to the record list in each response
    #[serde(default)]
    pub record_path: Option<String>,

    /// Request body template and window bound pointers
    #[serde(default)]
    pub body: WindowBody,

    /// Pointer receiving the status filter
    #[serde(default)]
    pub status_pointer: Option<String>,

    /// Pagination strategy
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Window policy
    #[serde(default)]
    pub window: WindowPolicy,
}

impl EndpointDefinition {
    /// Create an unpaginated, unwindowed endpoint
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            method: Method::Post,
            url: url.into(),
            record_path: None,
            body: WindowBody::default(),
            status_pointer: None,
            pagination: PaginationConfig::None,
            window: WindowPolicy::Single,
        }
    }

    /// Parse an endpoint from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let endpoint: Self = serde_yaml::from_str(yaml)?;
        endpoint.validate()?;
        Ok(endpoint)
    }

    /// Load an endpoint from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Set the HTTP method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the record path
    #[must_use]
    pub fn with_record_path(mut self, path: impl Into<String>) -> Self {
        self.record_path = Some(path.into());
        self
    }

    /// Set the body builder
    #[must_use]
    pub fn with_body(mut self, body: WindowBody) -> Self {
        self.body = body;
        self
    }

    /// Set the pagination strategy
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Set the window policy
    #[must_use]
    pub fn with_window(mut self, window: WindowPolicy) -> Self {
        self.window = window;
        self
    }

    /// Write a status filter into the body template
    pub fn with_status(mut self, status: impl Into<String>) -> Result<Self> {
        let Some(pointer) = self.status_pointer.clone() else {
            return Err(Error::invalid_value(
                "status",
                format!("endpoint '{}' has no status filter", self.name),
            ));
        };
        set_pointer(
            &mut self.body.template,
            &pointer,
            serde_json::Value::String(status.into()),
        )?;
        Ok(self)
    }

    /// Decoder for this endpoint's responses
    pub fn decoder(&self) -> JsonDecoder {
        match &self.record_path {
            Some(path) => JsonDecoder::with_path(path),
            None => JsonDecoder::new(),
        }
    }

    /// Check the definition for obvious mistakes
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_value("name", "must not be empty"));
        }
        if self.url.trim().is_empty() {
            return Err(Error::invalid_value(
                "url",
                format!("endpoint '{}' has an empty url", self.name),
            ));
        }
        if !self.body.template.is_object() {
            return Err(Error::invalid_value(
                "body.template",
                format!("endpoint '{}' body must be an object", self.name),
            ));
        }
        if self.method == Method::Get {
            if self.pagination != PaginationConfig::None {
                return Err(Error::invalid_value(
                    "pagination",
                    format!("GET endpoint '{}' cannot paginate", self.name),
                ));
            }
            if self.window != WindowPolicy::Single {
                return Err(Error::invalid_value(
                    "window",
                    format!("GET endpoint '{}' cannot be windowed", self.name),
                ));
            }
        }
        self.pagination.validate()?;
        self.window.planner()?;
        Ok(())
    }
}
