//! Product detail lookups.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::ecommerce::error::ECommerceError;
use crate::ecommerce::model::ProductDetailResult;
use crate::ecommerce::odata_model::{ODataProduct, ODataProductAttribute, ODataProductPrice};
use crate::observability::metrics;
use crate::odata::{ODataClient, ODataClientQuery, QueryBuildError};

/// Fetches a single product by id.
#[async_trait]
pub trait ProductDetailService: Send + Sync {
    async fn get_detail(&self, product_id: &str) -> Result<ProductDetailResult, ECommerceError>;
}

/// Product details served from the remote OData service.
pub struct ODataProductDetailService {
    client: Arc<ODataClient>,
}

impl ODataProductDetailService {
    /// Register the product model types and wrap the client.
    pub fn new(client: Arc<ODataClient>) -> Self {
        client.register_model::<ODataProduct>();
        client.register_model::<ODataProductPrice>();
        client.register_model::<ODataProductAttribute>();
        Self { client }
    }

    /// Query for one product, keyed by the quoted string literal of its id.
    ///
    /// The id is not escaped: an embedded `'` is sent as-is and yields a key
    /// the service will reject.
    pub fn detail_query(product_id: &str) -> Result<ODataClientQuery, QueryBuildError> {
        ODataClientQuery::builder()
            .with_entity_type::<ODataProduct>()
            .with_entity_key(format!("'{}'", product_id))
            .build()
    }
}

#[async_trait]
impl ProductDetailService for ODataProductDetailService {
    async fn get_detail(&self, product_id: &str) -> Result<ProductDetailResult, ECommerceError> {
        if product_id.trim().is_empty() {
            return Err(ECommerceError::new("product id must not be empty"));
        }

        let start = Instant::now();
        let query = Self::detail_query(product_id).map_err(|e| {
            ECommerceError::with_source(format!("invalid product id '{}'", product_id), e)
        })?;

        match self.client.get_entity::<ODataProduct>(&query).await {
            Ok(product) => {
                metrics::record_product_detail("ok", start);
                tracing::debug!(product_id, "Product detail fetched");
                Ok(ProductDetailResult::new(Box::new(product)))
            }
            Err(e) => {
                metrics::record_product_detail("error", start);
                tracing::warn!(product_id, error = %e, "Product detail lookup failed");
                Err(ECommerceError::with_source(
                    format!("could not fetch product '{}'", product_id),
                    e,
                ))
            }
        }
    }
}
