//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//! - `api_auth_rejected_total` (counter): gate rejections by reason
//! - `api_verifier_cache_total` (counter): token cache hits/misses
//!
//! Recording is cheap and safe without an installed exporter; calls
//! become no-ops when metrics are disabled.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!("api_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a request rejected by the access gate.
pub fn record_auth_rejected(reason: &'static str) {
    counter!("api_auth_rejected_total", "reason" => reason).increment(1);
}

/// Record a verification cache lookup.
pub fn record_verifier_cache(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    counter!("api_verifier_cache_total", "outcome" => outcome).increment(1);
}
