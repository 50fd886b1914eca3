//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, GET routes per proxied prefix)
//!     → request.rs (request ID)
//!     → proxy::ForwardingProxy (rewrite, header selection, backend call)
//!     → response.rs (map proxy failures to statuses)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
