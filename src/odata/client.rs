//! OData client: model registry plus single-entity execution.

use std::sync::Arc;

use dashmap::DashMap;

use crate::odata::error::{ODataClientError, ODataResult};
use crate::odata::model::{ModelDescriptor, ODataModel};
use crate::odata::query::ODataClientQuery;
use crate::odata::transport::ODataTransport;

/// Client shared by every service talking to one OData endpoint.
///
/// Safe for concurrent use; registration and queries may interleave freely.
#[derive(Clone)]
pub struct ODataClient {
    transport: Arc<dyn ODataTransport>,
    registry: Arc<DashMap<&'static str, ModelDescriptor>>,
}

impl ODataClient {
    pub fn new(transport: Arc<dyn ODataTransport>) -> Self {
        Self {
            transport,
            registry: Arc::new(DashMap::new()),
        }
    }

    /// Register a model type. Idempotent; returns `true` on first registration.
    pub fn register_model<M: ODataModel>(&self) -> bool {
        let descriptor = ModelDescriptor::of::<M>();
        let newly_registered = self
            .registry
            .insert(descriptor.type_name, descriptor)
            .is_none();
        if newly_registered {
            tracing::debug!(type_name = descriptor.type_name, "OData model registered");
        }
        newly_registered
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.registry.contains_key(type_name)
    }

    /// Execute a single-entity query and decode the result as `M`.
    pub async fn get_entity<M: ODataModel>(&self, query: &ODataClientQuery) -> ODataResult<M> {
        if query.entity_type() != M::TYPE_NAME {
            return Err(ODataClientError::TypeMismatch {
                expected: M::TYPE_NAME,
                actual: query.entity_type(),
            });
        }
        self.ensure_registered(query.descriptor())?;

        let resource = query.resource_path();
        let body = self.transport.get(&resource).await?;

        serde_json::from_slice(&body).map_err(|source| ODataClientError::Decode {
            type_name: M::TYPE_NAME,
            source,
        })
    }

    /// The queried type and every value type it embeds must be known.
    fn ensure_registered(&self, descriptor: &ModelDescriptor) -> ODataResult<()> {
        let required =
            std::iter::once(descriptor.type_name).chain(descriptor.nested_types.iter().copied());
        for type_name in required {
            if !self.is_registered(type_name) {
                return Err(ODataClientError::Unregistered(type_name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::Mutex;

    #[derive(Debug, Deserialize)]
    struct Widget {
        id: String,
        size: Size,
    }

    impl ODataModel for Widget {
        const TYPE_NAME: &'static str = "Test.Widget";
        const ENTITY_SET: Option<&'static str> = Some("Widgets");
        const NESTED_TYPES: &'static [&'static str] = &["Test.Size"];
    }

    #[derive(Debug, Deserialize)]
    struct Size {
        width: u32,
    }

    impl ODataModel for Size {
        const TYPE_NAME: &'static str = "Test.Size";
    }

    #[derive(Debug, Deserialize)]
    struct Gadget {}

    impl ODataModel for Gadget {
        const TYPE_NAME: &'static str = "Test.Gadget";
        const ENTITY_SET: Option<&'static str> = Some("Gadgets");
    }

    #[derive(Default)]
    struct StaticTransport {
        body: &'static str,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ODataTransport for StaticTransport {
        async fn get(&self, resource_path: &str) -> ODataResult<Vec<u8>> {
            self.requested.lock().unwrap().push(resource_path.to_string());
            Ok(self.body.as_bytes().to_vec())
        }
    }

    fn widget_query() -> ODataClientQuery {
        ODataClientQuery::builder()
            .with_entity_type::<Widget>()
            .with_entity_key("'w1'")
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_is_idempotent() {
        let client = ODataClient::new(Arc::new(StaticTransport::default()));
        assert!(client.register_model::<Widget>());
        assert!(!client.register_model::<Widget>());
        assert!(client.is_registered("Test.Widget"));
        assert!(!client.is_registered("Test.Size"));
    }

    #[tokio::test]
    async fn test_get_entity_decodes() {
        let transport = Arc::new(StaticTransport {
            body: r#"{"@odata.context":"$metadata#Widgets/$entity","id":"w1","size":{"width":3}}"#,
            ..Default::default()
        });
        let client = ODataClient::new(transport.clone());
        client.register_model::<Widget>();
        client.register_model::<Size>();

        let widget: Widget = client.get_entity(&widget_query()).await.unwrap();
        assert_eq!(widget.id, "w1");
        assert_eq!(widget.size.width, 3);
        assert_eq!(*transport.requested.lock().unwrap(), vec!["Widgets('w1')"]);
    }

    #[tokio::test]
    async fn test_nested_type_must_be_registered() {
        let transport = Arc::new(StaticTransport::default());
        let client = ODataClient::new(transport.clone());
        client.register_model::<Widget>();

        let err = client.get_entity::<Widget>(&widget_query()).await.unwrap_err();
        assert!(matches!(err, ODataClientError::Unregistered("Test.Size")));
        assert!(transport.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_type_mismatch() {
        let client = ODataClient::new(Arc::new(StaticTransport::default()));
        client.register_model::<Gadget>();

        let err = client.get_entity::<Gadget>(&widget_query()).await.unwrap_err();
        assert!(matches!(
            err,
            ODataClientError::TypeMismatch { expected: "Test.Gadget", actual: "Test.Widget" }
        ));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_decode_error() {
        let client = ODataClient::new(Arc::new(StaticTransport {
            body: r#"{"id":"w1"}"#,
            ..Default::default()
        }));
        client.register_model::<Widget>();
        client.register_model::<Size>();

        let err = client.get_entity::<Widget>(&widget_query()).await.unwrap_err();
        assert!(matches!(err, ODataClientError::Decode { type_name: "Test.Widget", .. }));
    }
}
