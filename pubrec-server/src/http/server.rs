//! Axum server setup
//!
//! Server skeleton with:
//! - JSON API nested under a configurable prefix
//! - Optional static directory served outside the prefix
//! - Localhost-only CORS by default
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{HeaderValue, Uri};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use pubrec_core::PublicRecord;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:1055)
    pub bind_addr: SocketAddr,

    /// Path the JSON API is mounted under (default: /api)
    pub api_prefix: String,

    /// Directory served for every path outside the API prefix
    pub static_dir: Option<PathBuf>,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,

    /// Log every request line at info level
    pub verbose: bool,

    /// Number of blocks GET /recent looks back over
    pub recent_window: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 1055)),
            api_prefix: "/api".to_string(),
            static_dir: None,
            cors_permissive: false,
            verbose: false,
            recent_window: 6,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub record: PublicRecord,
    /// Unix time the server was built
    pub started_at: i64,
    pub recent_window: i64,
}

impl AppState {
    pub fn new(record: PublicRecord, recent_window: i64) -> Self {
        Self {
            record,
            started_at: chrono::Utc::now().timestamp(),
            recent_window,
        }
    }
}

/// Build the application router.
///
/// The API answers unknown paths under its prefix with a JSON 404. When a
/// static directory is configured it backs everything else.
pub fn build_router(record: PublicRecord, config: &ServerConfig) -> Router {
    let state = Arc::new(AppState::new(record, config.recent_window));

    let api = Router::new()
        .merge(routes::items::router())
        .merge(routes::aggregates::router())
        .merge(routes::status::router())
        .fallback(api_not_found);

    let mut app = match normalize_prefix(&config.api_prefix) {
        Some(prefix) => Router::new().nest(&prefix, api),
        None => api,
    };

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    if config.verbose {
        app = app.layer(middleware::from_fn(log_request));
    }

    app.layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let record = PublicRecord::open(&StoreConfig::default()).await?;
/// run_server(record, ServerConfig::default()).await?;
/// ```
pub async fn run_server(record: PublicRecord, config: ServerConfig) -> Result<(), ServerError> {
    if let Some(dir) = &config.static_dir {
        if !dir.is_dir() {
            return Err(ServerError::StaticDir(dir.clone()));
        }
        tracing::info!(static_dir = %dir.display(), "Serving static files");
    }

    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
    }

    let app = build_router(record.clone(), &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        prefix = %config.api_prefix,
        "Server listening on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    record.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// `/api/` and `api` both mean `/api`; an empty or `/` prefix mounts at root.
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:1055"),
            HeaderValue::from_static("http://127.0.0.1:1055"),
        ])
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn api_not_found(uri: Uri) -> ApiError {
    ApiError::not_found("route", uri.path())
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!(method = %req.method(), uri = %req.uri(), "request");
    next.run(req).await
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("static directory {0} does not exist")]
    StaticDir(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 1055);
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.recent_window, 6);
        assert!(!config.cors_permissive);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn prefix_normalization() {
        assert_eq!(normalize_prefix("/api").as_deref(), Some("/api"));
        assert_eq!(normalize_prefix("api/").as_deref(), Some("/api"));
        assert_eq!(normalize_prefix("/v1/api/").as_deref(), Some("/v1/api"));
        assert_eq!(normalize_prefix("/"), None);
        assert_eq!(normalize_prefix(""), None);
    }

    #[test]
    fn config_from_partial_table() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "bind_addr": "0.0.0.0:8080",
            "verbose": true
        }))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.verbose);
        assert_eq!(config.api_prefix, "/api");
    }
}
