//! Request forwarding over the pooled backend client.
//!
//! # Responsibilities
//! - Own the process-wide pooled client and the credential header
//! - Derive the backend request from an inbound one
//! - Relay the backend outcome: streamed body on 200, bare status otherwise
//!
//! # Design Decisions
//! - Successful bodies are streamed, never buffered
//! - Non-OK bodies are drained (bounded) so the connection goes back to the pool
//! - Content-Type is only copied when `propagate_content_type` is set

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::{BackendConfig, ProxyRoutesConfig, TimeoutConfig};
use crate::proxy::auth::BasicCredentials;
use crate::proxy::headers::{is_ajax, select_forwarded_headers};
use crate::proxy::rewrite::{rebuild_query_string, rewrite_path};
use crate::proxy::ProxyError;

/// Largest non-OK body drained to keep its connection reusable.
const DRAIN_LIMIT: usize = 64 * 1024;

/// Per-request view of what is sent to the backend.
#[derive(Debug, Clone)]
pub struct ForwardedRequest {
    /// Backend base URL + rewritten path + rebuilt query string.
    pub uri: Uri,
    /// Inbound headers selected for relay.
    pub headers: HeaderMap,
    /// Whether the inbound request carried the async marker.
    pub is_ajax: bool,
}

/// Relays GET requests to the fixed backend admin server.
pub struct ForwardingProxy {
    client: Client<HttpConnector, Body>,
    base_url: String,
    authorization: Option<HeaderValue>,
    routes: ProxyRoutesConfig,
}

impl ForwardingProxy {
    /// Build the pooled client and install credentials.
    ///
    /// Runs once at startup; an error here is fatal to the component.
    pub fn new(
        backend: &BackendConfig,
        routes: ProxyRoutesConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, ProxyError> {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(timeouts.idle_secs))
            .pool_max_idle_per_host(timeouts.max_idle_per_host)
            .build(connector);

        let authorization = match BasicCredentials::from_config(backend) {
            Some(credentials) => {
                tracing::info!(
                    username = credentials.username(),
                    "Backend credentials installed"
                );
                Some(credentials.header_value()?)
            }
            None => None,
        };

        let base_url = backend.url.trim_end_matches('/').to_string();
        tracing::info!(
            backend = %base_url,
            prefixes = ?routes.path_prefixes,
            "Forwarding proxy initialized"
        );

        Ok(Self {
            client,
            base_url,
            authorization,
            routes,
        })
    }

    /// Backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path prefixes this proxy answers.
    pub fn path_prefixes(&self) -> &[String] {
        &self.routes.path_prefixes
    }

    /// Compute the backend target and header subset for an inbound request.
    pub fn prepare(&self, uri: &Uri, headers: &HeaderMap) -> Result<ForwardedRequest, ProxyError> {
        let path = rewrite_path(
            uri.path(),
            &self.routes.legacy_extension,
            &self.routes.canonical_extension,
        );
        let target = format!("{}{}{}", self.base_url, path, rebuild_query_string(uri.query()));
        let uri = target
            .parse::<Uri>()
            .map_err(|source| ProxyError::InvalidTarget { target, source })?;

        Ok(ForwardedRequest {
            uri,
            headers: select_forwarded_headers(headers),
            is_ajax: is_ajax(headers),
        })
    }

    /// Forward one inbound request and relay the backend outcome.
    pub async fn handle(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let forwarded = self.prepare(request.uri(), request.headers())?;
        tracing::debug!(
            target_uri = %forwarded.uri,
            is_ajax = forwarded.is_ajax,
            forwarded_headers = forwarded.headers.len(),
            "Forwarding to backend"
        );

        let response = self.client.request(self.outbound_request(forwarded)?).await?;
        let (parts, body) = response.into_parts();

        if parts.status != StatusCode::OK {
            tracing::debug!(status = %parts.status, "Backend returned non-OK status");
            release(body).await;
            return Ok(parts.status.into_response());
        }

        let mut relayed = Response::new(Body::new(body));
        if self.routes.propagate_content_type {
            if let Some(content_type) = parts.headers.get(header::CONTENT_TYPE) {
                relayed
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, content_type.clone());
            }
        }
        Ok(relayed)
    }

    /// Release the connection pool. Idle connections close once the client drops.
    pub fn close(self) {
        tracing::info!(backend = %self.base_url, "Backend connection pool released");
    }

    fn outbound_request(&self, forwarded: ForwardedRequest) -> Result<Request<Body>, ProxyError> {
        let mut request = Request::builder()
            .method(Method::GET)
            .uri(forwarded.uri)
            .body(Body::empty())?;

        *request.headers_mut() = forwarded.headers;
        if let Some(authorization) = &self.authorization {
            request
                .headers_mut()
                .insert(header::AUTHORIZATION, authorization.clone());
        }
        Ok(request)
    }
}

/// Drain a discarded body; past the limit the connection is dropped instead.
async fn release(body: Incoming) {
    if let Err(e) = axum::body::to_bytes(Body::new(body), DRAIN_LIMIT).await {
        tracing::debug!(error = %e, "Discarding backend connection");
    }
}
