//! HTTP API module for the environment, health, and version endpoints.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
