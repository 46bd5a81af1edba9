//! Prometheus metrics
//!
//! The exporter runs its own HTTP listener on `METRICS_PORT`, keeping the
//! relay's router free of extra routes. Without it the recording calls below
//! are no-ops.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and exporter (call once at startup)
pub fn init_metrics(addr: SocketAddr) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;

    register_metrics();
    Ok(())
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "relay_requests_total",
        "Total number of relay requests processed"
    );
    metrics::describe_histogram!(
        "relay_request_duration_seconds",
        "Relay request duration in seconds"
    );
    metrics::describe_counter!(
        "relay_attachment_bytes_total",
        "Total attachment bytes forwarded upstream"
    );
}

/// Record a finished relay request
pub fn record_request(status: u16, model: &str, duration_secs: f64) {
    metrics::counter!(
        "relay_requests_total",
        "status" => status.to_string(),
        "model" => model.to_string()
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "model" => model.to_string())
        .record(duration_secs);
}

/// Record an attachment forwarded upstream
pub fn record_attachment(kind: &'static str, bytes: usize) {
    metrics::counter!("relay_attachment_bytes_total", "kind" => kind).increment(bytes as u64);
}
