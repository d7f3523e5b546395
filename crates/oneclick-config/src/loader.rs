//! Configuration loading and validation.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::OneclickConfig;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Load and validate configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<OneclickConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a YAML string.
pub fn parse_config(content: &str) -> Result<OneclickConfig, ConfigError> {
    let config: OneclickConfig = serde_yaml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &OneclickConfig) -> Result<(), ConfigError> {
    if config.version == 0 {
        return Err(ConfigError::Invalid(
            "version must be greater than 0".to_string(),
        ));
    }
    if config.app.name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "app.name must not be empty".to_string(),
        ));
    }
    if config.backend.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "backend.base_url must not be empty".to_string(),
        ));
    }
    if config.backend.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "backend.timeout_secs must be > 0".to_string(),
        ));
    }
    if config.upload.max_bytes == 0 {
        return Err(ConfigError::Invalid(
            "upload.max_bytes must be > 0".to_string(),
        ));
    }
    if config.upload.extension.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "upload.extension must not be empty".to_string(),
        ));
    }
    Ok(())
}
