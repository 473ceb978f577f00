//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by route, method, status
//! - `gateway_request_duration_seconds` (histogram): latency by route, status
//! - `gateway_downstream_calls_total` (counter): calls by service, method, outcome
//! - `gateway_downstream_duration_seconds` (histogram): call latency by service, method
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_downstream_call(
    service: &'static str,
    method: &'static str,
    outcome: &'static str,
    start: Instant,
) {
    metrics::counter!(
        "gateway_downstream_calls_total",
        "service" => service,
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "gateway_downstream_duration_seconds",
        "service" => service,
        "method" => method
    )
    .record(start.elapsed().as_secs_f64());
}
