//! Prometheus metrics for HTTP request tracking.

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::Result;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Route label used for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// How often buffered histogram samples are folded into their summaries.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of HTTP requests served"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and register metric descriptions.
///
/// Can succeed only once per process. Histogram samples are buffered until
/// upkeep runs, so pair this with [`spawn_upkeep`].
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Periodically drain buffered histogram samples so memory stays bounded
/// even when nothing scrapes `/metrics`.
pub fn spawn_upkeep(handle: PrometheusHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Record one served HTTP request.
///
/// `path` should be the matched route template, never the raw URI, to keep
/// label cardinality bounded.
pub fn record_http_request(method: &str, path: &str, status: u16, start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(latency_ms);
}
