//! Metrics collection and exposition.
//!
//! # Metrics
//! - `doaas_requests_total` (counter): requests by kind, status, format
//! - `doaas_request_duration_seconds` (histogram): handler latency by kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request. `kind` is help, endpoint, random,
/// not_found, or preflight.
pub fn record_request(kind: &'static str, status: u16, format: &'static str, start: Instant) {
    metrics::counter!(
        "doaas_requests_total",
        "kind" => kind,
        "status" => status.to_string(),
        "format" => format
    )
    .increment(1);

    metrics::histogram!("doaas_request_duration_seconds", "kind" => kind)
        .record(start.elapsed().as_secs_f64());
}
