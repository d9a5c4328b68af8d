//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): inbound requests by resource, status
//! - `proxy_upstream_duration_seconds` (histogram): outbound call latency by resource
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Serve a Prometheus scrape endpoint on `addr`. Needs a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count one inbound request once its final status is known.
pub fn record_request(resource: &'static str, status: u16) {
    metrics::counter!(
        "proxy_requests_total",
        "resource" => resource,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record how long one outbound call took.
pub fn record_upstream(resource: &'static str, start: Instant) {
    metrics::histogram!("proxy_upstream_duration_seconds", "resource" => resource)
        .record(start.elapsed().as_secs_f64());
}
