//! HTTP server layer
//!
//! Axum server with:
//! - Path parameter validation (mismatches are 404)
//! - JSON error responses
//! - Request tracing and graceful shutdown
//! - Optional static file fallback

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
