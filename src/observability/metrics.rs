//! Metrics collection and exposition.
//!
//! # Metrics
//! - `openedge_requests_total` (counter): requests by function, status
//! - `openedge_request_duration_seconds` (histogram): latency by function
//! - `openedge_upstream_requests_total` (counter): provider lookups by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; a no-op until an exporter is installed
//! - Prometheus exporter only when enabled in config

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint on `addr`. Requires a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(function: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "openedge_requests_total",
        "function" => function,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("openedge_request_duration_seconds", "function" => function)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream(outcome: &'static str) {
    metrics::counter!("openedge_upstream_requests_total", "outcome" => outcome).increment(1);
}
