//! Response mapping for proxy failures.
//!
//! # Responsibilities
//! - Map forwarding errors to HTTP status codes
//!
//! # Design Decisions
//! - Backend non-OK statuses never reach this path; they are relayed as-is
//! - Transport failures answer 502 with a short plain-text body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::proxy::ProxyError;

impl ProxyError {
    /// Status presented to the caller for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidTarget { .. } => StatusCode::BAD_REQUEST,
            ProxyError::InvalidCredentials | ProxyError::Request(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match status {
            StatusCode::BAD_GATEWAY => "Upstream request failed",
            StatusCode::BAD_REQUEST => "Invalid proxy target",
            _ => "Proxy error",
        };
        (status, body).into_response()
    }
}
