//! Configuration support for Cutout.
//!
//! The configuration is a small JSON document. Every field has a default so
//! a partial document (for example only `service.api_key`) is valid. In the
//! browser it is read from localStorage; see [`crate::constants::storage`].

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::ConfigError;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Background-removal service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            service: ServiceConfig::default(),
            preferences: UserPreferences::default(),
        }
    }
}

/// Service section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Endpoint receiving the multipart upload
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Static API credential sent with every request
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Value of the `size` form field
    #[serde(default = "default_size")]
    pub size: String,
}

fn default_endpoint() -> String {
    constants::service::DEFAULT_ENDPOINT.to_string()
}

/// Baked in at build time from `REMOVEBG_API_KEY`; empty if unset.
fn default_api_key() -> String {
    option_env!("REMOVEBG_API_KEY").unwrap_or_default().to_string()
}

fn default_size() -> String {
    constants::service::DEFAULT_SIZE.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: default_api_key(),
            size: default_size(),
        }
    }
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// File name offered when downloading the result
    #[serde(default = "default_download_file_name")]
    pub download_file_name: String,

    /// How long alerts stay on screen (ms)
    #[serde(default = "default_alert_duration_ms")]
    pub alert_duration_ms: u32,
}

fn default_download_file_name() -> String {
    constants::download::DEFAULT_FILE_NAME.to_string()
}

fn default_alert_duration_ms() -> u32 {
    constants::alert::DEFAULT_DURATION_MS
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            download_file_name: default_download_file_name(),
            alert_duration_ms: default_alert_duration_ms(),
        }
    }
}

impl AppConfig {
    /// Parse a config document, rejecting versions newer than this build.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(config)
    }
}
