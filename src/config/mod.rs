//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (FREDHOPPER_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → ConnectorConfig (validated, immutable)
//!     → handed to subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the backend endpoint and credentials
//!   stay fixed for the process lifetime (no hot reload)
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ConnectorConfig;
pub use schema::ListenerConfig;
pub use schema::BackendConfig;
pub use schema::ProxyRoutesConfig;
pub use schema::TimeoutConfig;
pub use schema::ODataConfig;
pub use schema::ObservabilityConfig;
