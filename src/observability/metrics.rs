//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_admin_requests_total` (counter): admin API calls by method, status
//!   (status `0` when the endpoint was unreachable)
//! - `gateway_admin_request_duration_seconds` (histogram): admin API latency
//! - `reconcile_changes_total` (counter): detected changes by kind
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::reconcile::ChangeSummary;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one admin API call.
pub fn record_admin_call(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_admin_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_admin_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a reconciliation.
pub fn record_changes(summary: &ChangeSummary) {
    for (kind, count) in [
        ("add", summary.added),
        ("update", summary.updated),
        ("delete", summary.deleted),
    ] {
        if count > 0 {
            metrics::counter!("reconcile_changes_total", "kind" => kind).increment(count as u64);
        }
    }
}
