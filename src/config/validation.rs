//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the backend endpoint and OData service URIs
//! - Validate proxied path prefixes before they become routes
//! - Validate addresses and log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ConnectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ConnectorConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("backend url '{0}' must be an absolute http URL with a host")]
    InvalidBackendUrl(String),

    #[error("at least one proxied path prefix is required")]
    NoPathPrefixes,

    #[error("path prefix '{0}' must start with '/', must not be '/' and must not end with '/'")]
    InvalidPathPrefix(String),

    #[error("path prefix '{0}' is configured more than once")]
    DuplicatePathPrefix(String),

    #[error("legacy and canonical extensions must not be empty")]
    EmptyExtension,

    #[error("odata service uri '{0}' must be an absolute http(s) URL")]
    InvalidServiceUri(String),

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ConnectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "metrics",
            value: config.observability.metrics_address.clone(),
        });
    }

    // The pooled connector speaks plain HTTP only.
    match Url::parse(&config.backend.url) {
        Ok(url) if url.scheme() == "http" && url.host_str().is_some() => {}
        _ => errors.push(ValidationError::InvalidBackendUrl(config.backend.url.clone())),
    }

    if config.proxy.path_prefixes.is_empty() {
        errors.push(ValidationError::NoPathPrefixes);
    }
    let mut seen = HashSet::new();
    for prefix in &config.proxy.path_prefixes {
        if !is_valid_prefix(prefix) {
            errors.push(ValidationError::InvalidPathPrefix(prefix.clone()));
        } else if !seen.insert(prefix.as_str()) {
            errors.push(ValidationError::DuplicatePathPrefix(prefix.clone()));
        }
    }

    if config.proxy.legacy_extension.is_empty() || config.proxy.canonical_extension.is_empty() {
        errors.push(ValidationError::EmptyExtension);
    }

    match Url::parse(&config.odata.service_uri) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {}
        _ => errors.push(ValidationError::InvalidServiceUri(config.odata.service_uri.clone())),
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Prefixes become axum routes, so route syntax characters are rejected too.
fn is_valid_prefix(prefix: &str) -> bool {
    prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains(['{', '}', '*', '?', '#'])
}
