//! Metrics collection and exposition.
//!
//! # Metrics
//! - `guard_requests_total` (counter): forwarded requests by method, status
//! - `guard_request_duration_seconds` (histogram): forward latency
//! - `guard_gate_decisions_total` (counter): gate outcomes by decision
//!
//! # Design Decisions
//! - Prometheus exposition via a dedicated listener, off the request path
//! - Labels carry method, status, and decision; never header values

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Exporter failure is logged, not fatal; the guard keeps serving.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus exporter"),
    }
}

/// Record one forwarded (or failed-forward) request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "guard_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "guard_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one gate decision.
pub fn record_decision(decision: &'static str) {
    metrics::counter!("guard_gate_decisions_total", "decision" => decision).increment(1);
}
