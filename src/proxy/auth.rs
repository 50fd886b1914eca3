//! Basic-auth credentials for the backend admin server.

use axum::http::HeaderValue;
use base64::{engine::general_purpose, Engine as _};

use crate::config::BackendConfig;
use crate::proxy::ProxyError;

/// Credentials injected into every outbound call, whatever the host.
#[derive(Clone)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Credentials for the configured backend, if a username is set.
    pub fn from_config(backend: &BackendConfig) -> Option<Self> {
        backend
            .credentials()
            .map(|(username, password)| Self::new(username, password))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Authorization` header value, marked sensitive so it stays out of logs.
    pub fn header_value(&self) -> Result<HeaderValue, ProxyError> {
        let token = general_purpose::STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {}", token))
            .map_err(|_| ProxyError::InvalidCredentials)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
