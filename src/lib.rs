//! Environment-aware demo HTTP service.
//!
//! Serves three fixed JSON endpoints that echo the deployment environment
//! label, so each stage of a deployment pipeline can confirm which
//! environment it is talking to:
//!
//! ```text
//! GET /         {"message": "...", "environment": "<label>", "status": "running"}
//! GET /health   {"status": "healthy", "environment": "<label>"}
//! GET /version  {"version": "1.0.0", "environment": "<label>"}
//! ```
//!
//! The label comes from `APP_ENV` (default `development`) and is fixed for the
//! life of the process.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP handlers and the route table
//! - [`metrics`]: Prometheus request metrics
//! - [`server`]: Listener binding and serving
//! - [`utils`]: Shutdown signal handling

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::{Config, Environment};
pub use error::{Result, ServiceError};
