//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// Environment variable overriding the platform credential.
pub const PLATFORM_API_KEY_ENV: &str = "MINTGATE_PLATFORM_API_KEY";

/// Environment variable overriding the application key.
pub const APP_KEY_ENV: &str = "MINTGATE_APP_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Load, overlay secrets from the environment, and validate configuration.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Secrets live in the environment in deployed setups; a value present
/// there wins over the config file.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(key) = std::env::var(PLATFORM_API_KEY_ENV) {
        config.platform.api_key = key;
    }
    if let Ok(key) = std::env::var(APP_KEY_ENV) {
        config.auth.app_key = key;
    }
}

/// Semantic validation; serde handles the syntactic side.
/// Returns all errors, not just the first.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.platform.api_url.is_empty() {
        errors.push("platform.api_url is required".to_string());
    } else if Url::parse(&config.platform.api_url).is_err() {
        errors.push(format!(
            "platform.api_url '{}' is not a valid URL",
            config.platform.api_url
        ));
    }

    if config.platform.api_key.is_empty() {
        errors.push(format!(
            "platform.api_key is required (config file or {PLATFORM_API_KEY_ENV})"
        ));
    }

    if config.auth.app_key.is_empty() {
        errors.push(format!(
            "auth.app_key is required (config file or {APP_KEY_ENV})"
        ));
    }

    if config.provisioner.poll_interval_ms == 0 {
        errors.push("provisioner.poll_interval_ms must be greater than zero".to_string());
    }

    if config.wallet.poll_attempts == 0 {
        errors.push("wallet.poll_attempts must be greater than zero".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors))
    }
}
