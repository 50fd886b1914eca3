//! E-commerce domain services.
//!
//! # Data Flow
//! ```text
//! get_detail("ABC123")
//!     → detail.rs (query: SDL.ECommerce.Product, key 'ABC123')
//!     → odata::ODataClient (remote fetch + decode into ODataProduct)
//!     → ProductDetailResult (Box<dyn Product>)
//! ```
//!
//! # Design Decisions
//! - Callers see connector-neutral traits, never OData types
//! - Every failure surfaces as ECommerceError with the cause attached
//! - No retry or fallback at this layer

pub mod detail;
pub mod error;
pub mod model;
pub mod odata_model;

pub use detail::{ODataProductDetailService, ProductDetailService};
pub use error::ECommerceError;
pub use model::{Product, ProductAttribute, ProductDetailResult, ProductPrice};
pub use odata_model::{ODataProduct, ODataProductAttribute, ODataProductPrice};
