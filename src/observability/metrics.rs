//! Metrics collection and exposition.
//!
//! # Metrics
//! - `platform_requests_total` (counter): platform calls by operation, outcome
//! - `platform_request_duration_seconds` (histogram): platform call latency
//! - `http_requests_total` (counter): served requests by route, status

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    if let Err(error) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::error!(error = %error, "Failed to install metrics exporter");
        return;
    }

    describe_counter!(
        "platform_requests_total",
        "Ledger platform calls by operation and outcome"
    );
    describe_histogram!(
        "platform_request_duration_seconds",
        "Ledger platform call latency"
    );
    describe_counter!("http_requests_total", "Served requests by route and status");

    tracing::info!(address = %addr, "Metrics exporter listening");
}

/// Record one outbound platform call.
pub fn record_platform_call(operation: &'static str, ok: bool, elapsed: Duration) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("platform_requests_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    histogram!("platform_request_duration_seconds", "operation" => operation)
        .record(elapsed.as_secs_f64());
}

/// Record one served HTTP request.
pub fn record_http_request(route: &'static str, status: u16) {
    counter!("http_requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
}
