//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxied prefixes (GET only)
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Forward requests through the shared ForwardingProxy
//! - Tear the backend pool down after draining

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ConnectorConfig;
use crate::http::request::{
    mark_caller_request_id, request_id, strip_generated_request_id, MakeRequestUuid, X_REQUEST_ID,
};
use crate::observability::metrics;
use crate::proxy::{ForwardingProxy, ProxyError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ForwardingProxy>,
}

/// HTTP server fronting the backend admin server.
pub struct HttpServer {
    router: Router,
    proxy: Arc<ForwardingProxy>,
    config: ConnectorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Builds the pooled backend client; failure here is fatal.
    pub fn new(config: ConnectorConfig) -> Result<Self, ProxyError> {
        let proxy = Arc::new(ForwardingProxy::new(
            &config.backend,
            config.proxy.clone(),
            &config.timeouts,
        )?);

        let state = AppState {
            proxy: proxy.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            proxy,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ConnectorConfig, state: AppState) -> Router {
        let mut router = Router::new();
        for prefix in &config.proxy.path_prefixes {
            // the catch-all needs a non-empty tail, so the bare trailing slash is its own route
            router = router
                .route(prefix, get(proxy_handler))
                .route(&format!("{}/", prefix), get(proxy_handler))
                .route(&format!("{}/{{*path}}", prefix), get(proxy_handler));
        }

        router
            .with_state(state)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(middleware::from_fn(mark_caller_request_id))
    }

    /// Router handle, e.g. for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires, then release the backend pool.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.proxy.base_url(),
            "HTTP server starting"
        );

        let Self { router, proxy, .. } = self;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        match Arc::try_unwrap(proxy) {
            Ok(proxy) => proxy.close(),
            Err(_) => tracing::warn!("Forwarding proxy still referenced after shutdown"),
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Relay one request under a proxied prefix.
async fn proxy_handler(
    State(state): State<AppState>,
    matched: MatchedPath,
    mut request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request);
    strip_generated_request_id(&mut request);
    let path = request.uri().path().to_string();
    let route = matched.as_str().to_string();

    let response = match state.proxy.handle(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Proxy request failed");
            e.into_response()
        }
    };

    let status = response.status();
    tracing::info!(
        request_id = %request_id,
        path = %path,
        status = status.as_u16(),
        "Request proxied"
    );
    metrics::record_proxy_request(&route, status.as_u16(), start_time);

    response
}
