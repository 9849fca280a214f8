//! pubrec-server: JSON HTTP API over the bulletin public record
//!
//! Thin adapter around [`pubrec_core::PublicRecord`]: path validation,
//! status code mapping and JSON encoding. All query semantics live in the
//! core crate.

pub mod http;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
