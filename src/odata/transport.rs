//! Reqwest-backed OData transport.
//!
//! The transport owns wire details only: resolving a resource path against
//! the service root, request timeout, and status mapping. Decoding into
//! models happens in the client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};

use crate::odata::error::{ODataClientError, ODataResult};

/// Fetches raw entity payloads from an OData service.
#[async_trait]
pub trait ODataTransport: Send + Sync {
    /// GET `resource_path` (relative to the service root) and return the JSON body.
    async fn get(&self, resource_path: &str) -> ODataResult<Vec<u8>>;
}

/// Transport performing HTTP GET requests below one service root.
pub struct HttpODataTransport {
    client: Client,
    service_root: Url,
}

impl HttpODataTransport {
    /// Build a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the service URI is not an absolute base URL or
    /// the reqwest client cannot be constructed.
    pub fn new(service_uri: &str, timeout: Duration) -> ODataResult<Self> {
        let service_root = Url::parse(service_uri)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ODataClientError::InvalidServiceUri(service_uri.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            service_root,
        })
    }

    /// Absolute URL for a resource path.
    pub fn resource_url(&self, resource_path: &str) -> ODataResult<Url> {
        let mut url = self.service_root.clone();
        url.path_segments_mut()
            .map_err(|_| ODataClientError::InvalidServiceUri(self.service_root.to_string()))?
            .pop_if_empty()
            .push(resource_path);
        Ok(url)
    }
}

#[async_trait]
impl ODataTransport for HttpODataTransport {
    async fn get(&self, resource_path: &str) -> ODataResult<Vec<u8>> {
        let url = self.resource_url(resource_path)?;
        tracing::debug!(url = %url, "Fetching OData resource");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ODataClientError::NotFound(resource_path.to_string()));
        }
        if !status.is_success() {
            return Err(ODataClientError::Status {
                status: status.as_u16(),
                resource: resource_path.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
