//! Connector-neutral product model.

use std::fmt;

/// A product as exposed to page rendering, whatever the backing connector.
pub trait Product: fmt::Debug + Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn thumbnail_url(&self) -> Option<&str>;
    fn price(&self) -> Option<&dyn ProductPrice>;
    fn attributes(&self) -> Vec<&dyn ProductAttribute>;
}

/// Price of a product.
pub trait ProductPrice: fmt::Debug + Send + Sync {
    fn price(&self) -> f64;

    /// Display form including currency, e.g. `"€ 19,95"`.
    fn formatted_price(&self) -> &str;
}

/// Named, possibly multi-valued product attribute.
pub trait ProductAttribute: fmt::Debug + Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn values(&self) -> &[String];
}

/// Envelope returned by product detail lookups.
#[derive(Debug)]
pub struct ProductDetailResult {
    product: Box<dyn Product>,
}

impl ProductDetailResult {
    pub fn new(product: Box<dyn Product>) -> Self {
        Self { product }
    }

    pub fn product(&self) -> &dyn Product {
        self.product.as_ref()
    }

    pub fn into_product(self) -> Box<dyn Product> {
        self.product
    }
}
