//! Run settings loaded from YAML or JSON
//!
//! Settings carry the provider base URL, the opaque header bag and any
//! custom endpoint definitions. Custom endpoints shadow built-in ones with
//! the same name.

use crate::connectors::{is_builtin, list_builtin, load_builtin};
use crate::endpoint::EndpointDefinition;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClientConfig;
use crate::types::HeaderBag;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default provider API root
pub const DEFAULT_BASE_URL: &str = "https://api-seller.ozon.ru";

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root for relative endpoint URLs
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Headers sent verbatim on every request (credentials live here)
    #[serde(default)]
    pub headers: HeaderBag,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Custom endpoint definitions
    #[serde(default)]
    pub endpoints: Vec<EndpointDefinition>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            headers: HeaderBag::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            endpoints: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") | None => Self::from_yaml_str(&content),
            Some(other) => Err(Error::config(format!(
                "Unsupported settings format '.{other}' (expected .yaml, .yml or .json)"
            ))),
        }
    }

    /// Add a header, replacing any existing value
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Check the base URL and every custom endpoint
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }

        for endpoint in &self.endpoints {
            endpoint.validate()?;
        }
        Ok(())
    }

    /// HTTP client configuration for these settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .headers(&self.headers);
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Resolve an endpoint by name: custom definitions first, then built-ins
    pub fn endpoint(&self, name: &str) -> Result<EndpointDefinition> {
        if let Some(endpoint) = self.endpoints.iter().find(|e| e.name == name) {
            return Ok(endpoint.clone());
        }
        load_builtin(name)
    }

    /// Every resolvable endpoint name
    pub fn endpoint_names(&self) -> Vec<String> {
        let mut names: Vec<String> = list_builtin().into_iter().map(String::from).collect();
        for endpoint in &self.endpoints {
            if !is_builtin(&endpoint.name) {
                names.push(endpoint.name.clone());
            }
        }
        names
    }
}
