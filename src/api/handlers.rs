//! HTTP API handlers.

use axum::{extract::State, http::header, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::config::Environment;

/// Greeting returned by the root endpoint.
pub const WELCOME_MESSAGE: &str = "Welcome to my DevOps Pipeline Demo!";

/// Version reported by `/version`.
pub const SERVICE_VERSION: &str = "1.0.0";

/// Application state shared with handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Environment label, fixed at startup.
    pub environment: Environment,
}

impl AppState {
    /// Create new app state.
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

/// Root response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    /// Fixed welcome string.
    pub message: String,
    /// Current environment label.
    pub environment: String,
    /// Always "running".
    pub status: String,
}

impl HomeResponse {
    /// Build the root payload for `environment`.
    pub fn new(environment: &Environment) -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
            environment: environment.to_string(),
            status: "running".to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy".
    pub status: String,
    /// Current environment label.
    pub environment: String,
}

impl HealthResponse {
    /// Build the health payload for `environment`.
    pub fn new(environment: &Environment) -> Self {
        Self {
            status: "healthy".to_string(),
            environment: environment.to_string(),
        }
    }
}

/// Version response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    /// Service version, independent of the environment.
    pub version: String,
    /// Current environment label.
    pub environment: String,
}

impl VersionResponse {
    /// Build the version payload for `environment`.
    pub fn new(environment: &Environment) -> Self {
        Self {
            version: SERVICE_VERSION.to_string(),
            environment: environment.to_string(),
        }
    }
}

/// Root handler - welcome message and running status.
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service is running", body = HomeResponse)
    )
)]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(HomeResponse::new(&state.environment)))
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::new(&state.environment)))
}

/// Version handler.
#[utoipa::path(
    get,
    path = "/version",
    tag = "service",
    responses(
        (status = 200, description = "Service version", body = VersionResponse)
    )
)]
pub async fn version(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(VersionResponse::new(&state.environment)))
}

/// Prometheus scrape handler.
pub async fn prometheus_metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}

/// OpenAPI description of the service endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "DevOps Pipeline Demo", version = "1.0.0"),
    paths(home, health, version),
    components(schemas(HomeResponse, HealthResponse, VersionResponse)),
    tags((name = "service", description = "Environment-aware status endpoints"))
)]
pub struct ApiDoc;

/// OpenAPI document handler.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
