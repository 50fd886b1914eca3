//! OData representations of the product model.

use serde::{Deserialize, Serialize};

use crate::ecommerce::model::{Product, ProductAttribute, ProductPrice};
use crate::odata::ODataModel;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ODataProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub price: Option<ODataProductPrice>,
    #[serde(default)]
    pub attributes: Vec<ODataProductAttribute>,
}

impl ODataModel for ODataProduct {
    const TYPE_NAME: &'static str = "SDL.ECommerce.Product";
    const ENTITY_SET: Option<&'static str> = Some("Products");
    const NESTED_TYPES: &'static [&'static str] = &[
        ODataProductPrice::TYPE_NAME,
        ODataProductAttribute::TYPE_NAME,
    ];
}

impl Product for ODataProduct {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    fn price(&self) -> Option<&dyn ProductPrice> {
        self.price.as_ref().map(|p| p as &dyn ProductPrice)
    }

    fn attributes(&self) -> Vec<&dyn ProductAttribute> {
        self.attributes
            .iter()
            .map(|a| a as &dyn ProductAttribute)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ODataProductPrice {
    pub price: f64,
    pub formatted_price: String,
}

impl ODataModel for ODataProductPrice {
    const TYPE_NAME: &'static str = "SDL.ECommerce.ProductPrice";
}

impl ProductPrice for ODataProductPrice {
    fn price(&self) -> f64 {
        self.price
    }

    fn formatted_price(&self) -> &str {
        &self.formatted_price
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ODataProductAttribute {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl ODataModel for ODataProductAttribute {
    const TYPE_NAME: &'static str = "SDL.ECommerce.ProductAttribute";
}

impl ProductAttribute for ODataProductAttribute {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn values(&self) -> &[String] {
        &self.values
    }
}
