//! Remote OData query capability.
//!
//! # Data Flow
//! ```text
//! startup: register_model::<T>() for entity + nested value types
//!
//! ODataClientQueryBuilder (entity type + key)
//!     → ODataClientQuery (immutable)
//!     → client.rs (type + registration checks)
//!     → transport.rs (GET {service_root}/{EntitySet}({key}))
//!     → serde_json decode into the registered model
//! ```
//!
//! # Design Decisions
//! - Only single-entity key lookups; no filters, expansion or paging
//! - Transport is a trait seam so services can be tested without HTTP
//! - Registry is concurrent (DashMap), registration is idempotent

pub mod client;
pub mod error;
pub mod model;
pub mod query;
pub mod transport;

pub use client::ODataClient;
pub use error::{ODataClientError, ODataResult, QueryBuildError};
pub use model::{ModelDescriptor, ODataModel};
pub use query::{ODataClientQuery, ODataClientQueryBuilder};
pub use transport::{HttpODataTransport, ODataTransport};
