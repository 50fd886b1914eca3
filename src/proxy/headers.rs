//! Selective header propagation.
//!
//! Only in-page asynchronous calls (marked with `X-Requested-With`) get any
//! inbound headers relayed, and then only names under a fixed allow-list of
//! prefixes. Cookies, accept headers and caller credentials never pass.

use axum::http::{HeaderMap, HeaderName};

/// Marker header set by in-page asynchronous requests.
pub const AJAX_MARKER: HeaderName = HeaderName::from_static("x-requested-with");

/// Lowercase name prefixes relayed for asynchronous requests.
pub const FORWARDED_PREFIXES: [&str; 3] = ["wicket", "x-", "user-agent"];

/// Whether the request originated from an in-page asynchronous call.
pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers.contains_key(AJAX_MARKER)
}

/// Headers to relay to the backend for this request.
///
/// Empty for non-asynchronous requests.
pub fn select_forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();
    if !is_ajax(headers) {
        return forwarded;
    }

    for (name, value) in headers.iter() {
        if is_forwardable(name) {
            forwarded.append(name.clone(), value.clone());
        }
    }
    forwarded
}

/// `HeaderName` is always lowercase, so a plain prefix test is case-insensitive.
fn is_forwardable(name: &HeaderName) -> bool {
    let name = name.as_str();
    FORWARDED_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}
