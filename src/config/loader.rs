//! Configuration loading from disk and environment.

use std::path::Path;
use std::fs;
use crate::config::schema::ConnectorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `backend.url`.
pub const ENV_BACKEND_URL: &str = "FREDHOPPER_ADMINSERVER_URL";
/// Environment variable overriding `backend.username`.
pub const ENV_BACKEND_USERNAME: &str = "FREDHOPPER_ACCESS_USERNAME";
/// Environment variable overriding `backend.password`.
pub const ENV_BACKEND_PASSWORD: &str = "FREDHOPPER_ACCESS_PASSWORD";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load, apply environment overrides and validate configuration.
///
/// Without a path the built-in defaults are used as the base.
pub fn load_config(path: Option<&Path>) -> Result<ConnectorConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ConnectorConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    if config.backend.credentials().is_none()
        && config.backend.password.as_deref().is_some_and(|p| !p.is_empty())
    {
        tracing::warn!("Backend password set without a username; no credentials will be sent");
    }

    Ok(config)
}

/// Overlay backend endpoint settings from a variable lookup.
pub fn apply_env_overrides<F>(mut config: ConnectorConfig, lookup: F) -> ConnectorConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BACKEND_URL) {
        config.backend.url = url;
    }
    if let Some(username) = lookup(ENV_BACKEND_USERNAME) {
        config.backend.username = Some(username);
    }
    if let Some(password) = lookup(ENV_BACKEND_PASSWORD) {
        config.backend.password = Some(password);
    }
    config
}
