//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Keep an ID supplied by the caller
//! - Keep generated IDs off the backend call
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Only an ID the caller sent is relayed (as any other `x-` header)

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Whether the inbound request already carried an `x-request-id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerRequestId(pub bool);

/// Record whether the caller supplied a request ID. Must run before
/// `SetRequestIdLayer` fills one in.
pub async fn mark_caller_request_id(mut request: Request<Body>, next: Next) -> Response {
    let supplied = request.headers().contains_key(X_REQUEST_ID);
    request.extensions_mut().insert(CallerRequestId(supplied));
    next.run(request).await
}

/// Drop a request ID the proxy generated itself.
pub fn strip_generated_request_id<B>(request: &mut Request<B>) {
    if request.extensions().get::<CallerRequestId>() == Some(&CallerRequestId(false)) {
        request.headers_mut().remove(X_REQUEST_ID);
    }
}

/// Request ID of a request, or `"unknown"` when none was assigned.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
