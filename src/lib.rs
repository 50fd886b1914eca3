//! E-commerce connector shims.
//!
//! - [`proxy`]: selective forwarding proxy to the merchandising admin server
//! - [`odata`]: declarative single-entity client for the remote OData service
//! - [`ecommerce`]: product detail service built on top of it

pub mod config;
pub mod ecommerce;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod odata;
pub mod proxy;

pub use config::ConnectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
