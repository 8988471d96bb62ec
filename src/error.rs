//! Unified error types for the service.

use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

/// Unified error type for the service.
///
/// Every variant is a startup or shutdown failure; request handling itself
/// cannot fail.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// The HTTP listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the bind was attempted on.
        addr: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an IO error.
    #[error("http server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] BuildError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
