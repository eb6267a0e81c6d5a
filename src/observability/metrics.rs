//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by route, status
//! - `relay_request_duration_seconds` (histogram): latency by route
//! - `relay_transactions_total` (counter): submissions by function, outcome
//! - `relay_rpc_failures_total` (counter): failed RPC attempts by method
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed HTTP request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    counter!(
        "relay_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("relay_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a transaction submission attempt.
pub fn record_transaction(function: &'static str, outcome: &'static str) {
    counter!(
        "relay_transactions_total",
        "function" => function,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one failed attempt against one RPC endpoint.
pub fn record_rpc_failure(method: &'static str) {
    counter!("relay_rpc_failures_total", "method" => method).increment(1);
}
