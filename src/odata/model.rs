//! Model types the client can decode.

use serde::de::DeserializeOwned;

/// A type the OData client knows how to decode.
///
/// Entity types carry an entity set and can be fetched by key; complex
/// (value) types only appear nested inside entities.
pub trait ODataModel: DeserializeOwned + Send + Sync + 'static {
    /// Qualified type name in the service schema.
    const TYPE_NAME: &'static str;

    /// Entity set the type is addressed through, if it is an entity type.
    const ENTITY_SET: Option<&'static str> = None;

    /// Qualified names of the value types this model embeds.
    const NESTED_TYPES: &'static [&'static str] = &[];
}

/// Type-level description of a model, detached from its Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub type_name: &'static str,
    pub entity_set: Option<&'static str>,
    pub nested_types: &'static [&'static str],
}

impl ModelDescriptor {
    pub fn of<M: ODataModel>() -> Self {
        Self {
            type_name: M::TYPE_NAME,
            entity_set: M::ENTITY_SET,
            nested_types: M::NESTED_TYPES,
        }
    }
}
