//! Target path and query string reconstruction.
//!
//! # Responsibilities
//! - Swap the legacy page extension for the canonical one
//! - Rebuild the query string with form-encoded values
//!
//! # Design Decisions
//! - The raw (still percent-encoded) inbound path is used as-is
//! - One entry per distinct parameter name, first value wins
//! - Parameter order follows the inbound query

use url::form_urlencoded;

/// Replace every occurrence of `legacy` in `path` with `canonical`.
pub fn rewrite_path(path: &str, legacy: &str, canonical: &str) -> String {
    path.replace(legacy, canonical)
}

/// Rebuild `?k=v&k=v` from a raw inbound query.
///
/// Returns an empty string when the query carries no parameters.
pub fn rebuild_query_string(raw_query: Option<&str>) -> String {
    let Some(raw_query) = raw_query else {
        return String::new();
    };

    let mut params: Vec<(String, String)> = Vec::new();
    for (name, value) in form_urlencoded::parse(raw_query.as_bytes()) {
        if params.iter().any(|(seen, _)| seen.as_str() == name) {
            continue;
        }
        params.push((name.into_owned(), value.into_owned()));
    }

    if params.is_empty() {
        return String::new();
    }

    let pairs: Vec<String> = params
        .iter()
        .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
        .collect();

    format!("?{}", pairs.join("&"))
}

fn encode(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes()).collect()
}
