//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use super::handlers::{health, home, openapi, prometheus_metrics, version, AppState};
use super::middleware::track_requests;

/// Create the API router.
///
/// The full route table lives here. `/metrics` is mounted only when a
/// Prometheus handle is supplied.
pub fn create_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let mut router = Router::new()
        // Service endpoints
        .route("/", get(home))
        .route("/health", get(health))
        .route("/version", get(version))
        // API description
        .route("/api-docs/openapi.json", get(openapi))
        .with_state(state);

    if let Some(handle) = metrics {
        router = router.merge(metrics_router(handle));
    }

    router
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
}

/// Router exposing the Prometheus scrape endpoint.
fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(handle)
}
