//! Metrics collection and exposition.
//!
//! # Metrics
//! - `connector_proxy_requests_total` (counter): proxied requests by prefix, status
//! - `connector_proxy_request_duration_seconds` (histogram): proxy latency
//! - `connector_product_detail_total` (counter): detail lookups by outcome
//! - `connector_product_detail_duration_seconds` (histogram): lookup latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one proxied request.
pub fn record_proxy_request(prefix: &str, status: u16, start: Instant) {
    let labels = [
        ("prefix", prefix.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("connector_proxy_requests_total", &labels).increment(1);
    metrics::histogram!("connector_proxy_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record one product detail lookup.
pub fn record_product_detail(outcome: &'static str, start: Instant) {
    metrics::counter!("connector_product_detail_total", "outcome" => outcome).increment(1);
    metrics::histogram!("connector_product_detail_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
