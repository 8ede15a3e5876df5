//! Configuration management.
//!
//! Settings are loaded from a JSON document (or file) under the
//! `"rest-client"` key, merged with defaults, validated, and kept in a global
//! that clients read when they are created.

pub mod schema;

pub use schema::ClientConfig;

use crate::error::{RestError, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::Path;
use std::sync::RwLock;

/// Key under which settings live in a settings document.
pub const SETTINGS_KEY: &str = "rest-client";

/// Global configuration instance.
static CONFIG: Lazy<RwLock<ClientConfig>> = Lazy::new(|| RwLock::new(ClientConfig::default()));

/// Loads configuration from a settings document.
///
/// Unparseable settings are logged and ignored in favour of defaults.
/// Settings that parse but fail validation are rejected and the global
/// configuration is left unchanged.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value containing settings under `"rest-client"`
///
/// # Example
///
/// ```no_run
/// use rest_dispatch::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "rest-client": {
///         "baseUrl": "https://api.example.com",
///         "timeout": 60000
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ClientConfig> {
    let mut config = ClientConfig::default();

    if let Some(settings) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<ClientConfig>(settings.clone()) {
            Ok(user_config) => config = config.merge(&user_config),
            Err(e) => warn!(
                "Failed to parse {} settings: {}. Using defaults.",
                SETTINGS_KEY, e
            ),
        }
    }

    config
        .validate()
        .map_err(|e| RestError::Configuration(format!("Invalid configuration: {}", e)))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }
    debug!("Loaded configuration with base URL '{}'", config.base_url);

    Ok(config)
}

/// Loads configuration from a JSON settings file.
///
/// # Returns
///
/// `Err(RestError::Configuration)` if the file cannot be read or is not JSON.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RestError::Configuration(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let settings: Value = serde_json::from_str(&contents).map_err(|e| {
        RestError::Configuration(format!("{} is not valid JSON: {}", path.display(), e))
    })?;
    load_config(Some(settings))
}

/// Gets a copy of the current global configuration.
pub fn get_config() -> ClientConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| ClientConfig::default())
}

/// Updates the global configuration in place.
///
/// If the updated configuration fails validation it is reset to defaults.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut ClientConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            warn!("Configuration validation failed after update: {}", e);
            *config = ClientConfig::default();
        }
    }
}

/// Resets the global configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = ClientConfig::default();
    }
}
