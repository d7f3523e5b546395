//! # Oneclick Config
//!
//! Unified single-file configuration management. A single `oneclick.yaml`
//! configures the backend endpoint, upload limits, and logging.

mod loader;

pub use loader::{load_config, parse_config, ConfigError};

use serde::Deserialize;

/// Top-level configuration schema.
#[derive(Debug, Clone, Deserialize)]
pub struct OneclickConfig {
    /// Config schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for OneclickConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            app: AppConfig::default(),
            backend: BackendConfig::default(),
            upload: UploadConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            environment: default_env(),
        }
    }
}

fn default_app_name() -> String {
    "oneclick".to_string()
}

fn default_env() -> String {
    "development".to_string()
}

/// Where the remote training backend lives.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Client-side dataset validation limits.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Hard size limit in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    /// Required file-name extension, including the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            extension: default_extension(),
        }
    }
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_extension() -> String {
    ".csv".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"oneclick=debug"`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "oneclick=info".to_string()
}
