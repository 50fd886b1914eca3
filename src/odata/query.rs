//! Declarative single-entity queries.
//!
//! # Design Decisions
//! - Queries are immutable once built; the builder is consumed by `build`
//! - The key is kept verbatim, callers supply the protocol literal
//!   (e.g. `'ABC123'` for string keys)

use crate::odata::error::QueryBuildError;
use crate::odata::model::{ModelDescriptor, ODataModel};

/// "Fetch one entity of type T by key K".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ODataClientQuery {
    entity_type: ModelDescriptor,
    entity_set: &'static str,
    entity_key: String,
}

impl ODataClientQuery {
    pub fn builder() -> ODataClientQueryBuilder {
        ODataClientQueryBuilder::default()
    }

    /// Qualified name of the queried type.
    pub fn entity_type(&self) -> &'static str {
        self.entity_type.type_name
    }

    pub fn entity_set(&self) -> &'static str {
        self.entity_set
    }

    pub fn entity_key(&self) -> &str {
        &self.entity_key
    }

    pub(crate) fn descriptor(&self) -> &ModelDescriptor {
        &self.entity_type
    }

    /// Resource path relative to the service root, e.g. `Products('ABC123')`.
    pub fn resource_path(&self) -> String {
        format!("{}({})", self.entity_set, self.entity_key)
    }
}

/// Fluent builder for [`ODataClientQuery`].
#[derive(Debug, Default)]
pub struct ODataClientQueryBuilder {
    entity_type: Option<ModelDescriptor>,
    entity_key: Option<String>,
}

impl ODataClientQueryBuilder {
    pub fn with_entity_type<M: ODataModel>(mut self) -> Self {
        self.entity_type = Some(ModelDescriptor::of::<M>());
        self
    }

    pub fn with_entity_key(mut self, key: impl Into<String>) -> Self {
        self.entity_key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<ODataClientQuery, QueryBuildError> {
        let entity_type = self.entity_type.ok_or(QueryBuildError::MissingEntityType)?;
        let entity_set = entity_type
            .entity_set
            .ok_or(QueryBuildError::NotAnEntity(entity_type.type_name))?;
        let entity_key = self
            .entity_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(QueryBuildError::MissingEntityKey)?;

        Ok(ODataClientQuery {
            entity_type,
            entity_set,
            entity_key,
        })
    }
}
