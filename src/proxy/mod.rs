//! Selective forwarding proxy to the backend admin server.
//!
//! # Data Flow
//! ```text
//! GET /heatmap/** | /preview/**
//!     → rewrite.rs (legacy extension swap, query string rebuild)
//!     → headers.rs (allow-listed headers, async requests only)
//!     → forward.rs (pooled client + basic auth → backend)
//!     → 200: stream body back | other: bare status
//! ```
//!
//! # Design Decisions
//! - One pooled client per process, built at startup, shared via `Arc`
//! - Credentials are preemptive and applied to every outbound call
//! - No retries, caching or balancing; transport errors fail the request

pub mod auth;
pub mod forward;
pub mod headers;
pub mod rewrite;

use thiserror::Error;

pub use auth::BasicCredentials;
pub use forward::{ForwardedRequest, ForwardingProxy};

/// Errors raised while forwarding a request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Configured credentials cannot be expressed as a header value.
    #[error("backend credentials are not a valid header value")]
    InvalidCredentials,

    /// Rewritten target is not a valid URI.
    #[error("invalid backend target '{target}': {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },

    /// Outbound request could not be assembled.
    #[error("failed to build backend request: {0}")]
    Request(#[from] axum::http::Error),

    /// Connect or I/O failure talking to the backend.
    #[error("backend request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}
