//! Listener binding and the HTTP serve loop.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::{Result, ServiceError};

/// Bind the HTTP listener.
///
/// A bind failure is fatal for the service; it is never retried.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(|source| {
        error!("Failed to bind TCP listener to {}: {}", addr, source);
        ServiceError::Bind { addr, source }
    })
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn run<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("HTTP server listening on {}", addr);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServiceError::Serve)?;

    info!("HTTP server stopped");
    Ok(())
}
