//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the connector.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the connector.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Admin server the proxy forwards to.
    pub backend: BackendConfig,

    /// Proxied path prefixes and rewrite rules.
    pub proxy: ProxyRoutesConfig,

    /// Transport timeouts and pool sizing.
    pub timeouts: TimeoutConfig,

    /// Remote OData service used for product details.
    pub odata: ODataConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Backend admin server endpoint.
///
/// Fixed for the process lifetime; no request can override it.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL every proxied path is appended to.
    pub url: String,

    /// Basic-auth username. Empty or absent disables credentials.
    pub username: Option<String>,

    /// Basic-auth password.
    pub password: Option<String>,
}

impl BackendConfig {
    /// Username and password to inject, if a non-empty username is configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => {
                Some((username, self.password.as_deref().unwrap_or_default()))
            }
            _ => None,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8180".to_string(),
            username: None,
            password: None,
        }
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Proxied routes and path rewriting.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyRoutesConfig {
    /// Path prefixes answered by the proxy (any depth below them).
    pub path_prefixes: Vec<String>,

    /// Extension marker rewritten on the way to the backend.
    pub legacy_extension: String,

    /// Replacement for `legacy_extension`.
    pub canonical_extension: String,

    /// Copy the backend `Content-Type` onto successful responses.
    pub propagate_content_type: bool,
}

impl Default for ProxyRoutesConfig {
    fn default() -> Self {
        Self {
            path_prefixes: vec!["/heatmap".to_string(), "/preview".to_string()],
            legacy_extension: ".fhjsp".to_string(),
            canonical_extension: ".jsp".to_string(),
            propagate_content_type: false,
        }
    }
}

/// Timeout and pool configuration for the backend client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Idle pooled connection lifetime in seconds.
    pub idle_secs: u64,

    /// Maximum idle pooled connections kept per host.
    pub max_idle_per_host: usize,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            idle_secs: 60,
            max_idle_per_host: 32,
        }
    }
}

/// Remote OData service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ODataConfig {
    /// Service root, entity sets are resolved below it.
    pub service_uri: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ODataConfig {
    fn default() -> Self {
        Self {
            service_uri: "http://localhost:8097/ecommerce.svc".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
