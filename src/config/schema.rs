//! Configuration schema for the REST dispatcher.
//!
//! This module defines the settings document and its validation rules.

use crate::serializer::SerializerOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Settings for the HTTP client and its request pipeline.
///
/// Read from the `"rest-client"` key of a JSON settings document. Missing
/// fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL that route templates are joined onto.
    ///
    /// Empty means routes must render to absolute URLs. Defaults to empty.
    #[serde(default)]
    pub base_url: String,

    /// Request timeout in milliseconds.
    ///
    /// Covers connect, headers and body download. Defaults to 30000ms.
    ///
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to automatically follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow. Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate TLS certificates. Defaults to true.
    ///
    /// **Warning:** Disabling validation exposes requests to interception.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Headers added to every request before request-specific headers.
    #[serde(default)]
    pub default_headers: HashMap<String, String>,

    /// Named header groups that requests can opt into by name.
    #[serde(default)]
    pub header_models: HashMap<String, HashMap<String, String>>,

    /// JSON serializer options for bodies and responses.
    #[serde(default)]
    pub serializer: SerializerOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            user_agent: default_user_agent(),
            default_headers: HashMap::new(),
            header_models: HashMap::new(),
            serializer: SerializerOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if !self.base_url.is_empty() {
            let url = url::Url::parse(&self.base_url)
                .map_err(|e| format!("baseUrl '{}' is not a valid URL: {}", self.base_url, e))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(format!("baseUrl scheme '{}' is not supported", url.scheme()));
            }
        }

        if self.header_models.keys().any(|name| name.trim().is_empty()) {
            return Err("headerModels names must not be empty".to_string());
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Layers `other` on top of this configuration.
    ///
    /// Scalar settings come from `other`. Header maps are unioned, with
    /// entries from `other` winning on conflict.
    pub fn merge(&self, other: &ClientConfig) -> Self {
        let mut default_headers = self.default_headers.clone();
        default_headers.extend(other.default_headers.clone());

        let mut header_models = self.header_models.clone();
        for (name, headers) in &other.header_models {
            header_models
                .entry(name.clone())
                .or_default()
                .extend(headers.clone());
        }

        Self {
            base_url: other.base_url.clone(),
            timeout: other.timeout,
            follow_redirects: other.follow_redirects,
            max_redirects: other.max_redirects,
            validate_ssl: other.validate_ssl,
            user_agent: other.user_agent.clone(),
            default_headers,
            header_models,
            serializer: other.serializer.clone(),
        }
    }
}

fn default_timeout() -> u64 {
    30000 // 30 seconds in milliseconds
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("rest-dispatch/{}", env!("CARGO_PKG_VERSION"))
}
