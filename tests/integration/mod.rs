//! Integration tests for the demo service.
//!
//! Each test binds a real listener on an ephemeral localhost port and talks
//! to it over TCP.

use std::net::SocketAddr;

use devops_pipeline_demo::api::handlers::{HealthResponse, HomeResponse, VersionResponse};
use devops_pipeline_demo::api::{create_router, AppState};
use devops_pipeline_demo::config::Config;
use devops_pipeline_demo::server;
use pretty_assertions::assert_eq;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestApp {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<devops_pipeline_demo::Result<()>>,
}

impl TestApp {
    async fn stop(mut self) -> devops_pipeline_demo::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.expect("server task panicked")
    }
}

/// Start the service with the given variables standing in for the process
/// environment.
async fn spawn_app(vars: &[(&str, &str)]) -> TestApp {
    let config = Config::from_vars(vars.iter().copied()).expect("config should load");

    let listener = server::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind to ephemeral port");
    let addr = listener.local_addr().unwrap();

    let router = create_router(AppState::new(config.environment()), None);
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server::run(listener, router, async {
        let _ = rx.await;
    }));

    TestApp {
        base_url: format!("http://{}", addr),
        shutdown: Some(tx),
        handle,
    }
}

#[tokio::test]
async fn health_without_app_env_reports_development() {
    let app = spawn_app(&[]).await;

    let response = reqwest::get(format!("{}/health", app.base_url)).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: HealthResponse = response.json().await.unwrap();
    assert_eq!(
        body,
        HealthResponse {
            status: "healthy".to_string(),
            environment: "development".to_string(),
        }
    );

    app.stop().await.unwrap();
}

#[tokio::test]
async fn root_in_production_returns_welcome_payload() {
    let app = spawn_app(&[("APP_ENV", "production")]).await;

    let response = reqwest::get(format!("{}/", app.base_url)).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let body = response.text().await.unwrap();
    assert_eq!(
        body,
        r#"{"message":"Welcome to my DevOps Pipeline Demo!","environment":"production","status":"running"}"#
    );

    let parsed: HomeResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed.status, "running");

    app.stop().await.unwrap();
}

#[tokio::test]
async fn version_is_constant_across_environments() {
    for label in ["development", "staging", "production", "feature/login"] {
        let app = spawn_app(&[("APP_ENV", label)]).await;

        let response = reqwest::get(format!("{}/version", app.base_url)).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: VersionResponse = response.json().await.unwrap();
        assert_eq!(body.version, "1.0.0");
        assert_eq!(body.environment, label);

        app.stop().await.unwrap();
    }
}

#[tokio::test]
async fn repeated_requests_return_identical_bodies() {
    let app = spawn_app(&[("APP_ENV", "staging")]).await;
    let client = reqwest::Client::new();

    for path in ["/", "/health", "/version"] {
        let url = format!("{}{}", app.base_url, path);
        let first = client.get(&url).send().await.unwrap().bytes().await.unwrap();
        let second = client.get(&url).send().await.unwrap().bytes().await.unwrap();
        assert_eq!(first, second, "path {path}");
    }
    drop(client);

    app.stop().await.unwrap();
}

#[tokio::test]
async fn undefined_route_returns_not_found() {
    let app = spawn_app(&[]).await;

    let response = reqwest::get(format!("{}/deploy/production", app.base_url))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    app.stop().await.unwrap();
}

#[tokio::test]
async fn busy_port_is_a_bind_error() {
    let app = spawn_app(&[]).await;
    let addr: SocketAddr = app.base_url.trim_start_matches("http://").parse().unwrap();

    let result = server::bind(addr).await;

    assert!(matches!(
        result,
        Err(devops_pipeline_demo::ServiceError::Bind { .. })
    ));

    app.stop().await.unwrap();
}

#[tokio::test]
async fn shutdown_signal_stops_server_cleanly() {
    let app = spawn_app(&[]).await;
    let base_url = app.base_url.clone();

    app.stop().await.unwrap();

    assert!(reqwest::get(format!("{}/health", base_url)).await.is_err());
}
