//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): inbound requests by route, status
//! - `proxy_request_duration_seconds` (histogram): inbound latency by route
//! - `proxy_upstream_requests_total` (counter): upstream calls by result
//! - `proxy_upstream_failures_total` (counter): transport failures by kind
//! - `proxy_upstream_duration_seconds` (histogram): upstream latency
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! deployments without a metrics endpoint pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::upstream::UpstreamOutcome;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!(
        "proxy_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call.
pub fn record_upstream(outcome: &UpstreamOutcome, start: Instant) {
    let result = match outcome {
        UpstreamOutcome::Success { status_code, .. } => status_code.to_string(),
        UpstreamOutcome::TransportFailure { kind, .. } => {
            counter!("proxy_upstream_failures_total", "kind" => kind.as_str()).increment(1);
            kind.as_str().to_string()
        }
    };
    counter!("proxy_upstream_requests_total", "result" => result).increment(1);
    histogram!("proxy_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}
