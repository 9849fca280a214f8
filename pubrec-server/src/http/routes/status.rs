//! Liveness, store freshness and process metadata
//!
//! GET /status - version, process start and the newest block and bulletin
//! timestamps. Freshness fields are omitted on an empty store. A 200 also
//! means the store answered a query.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Status response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub version: &'static str,
    /// Unix time the server process started
    pub app_start: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_blk: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_bltn: Option<i64>,
}

/// GET /status
async fn status(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let freshness = state.record.get_status().await?;

    Ok(Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        app_start: state.started_at,
        latest_blk: freshness.latest_blk,
        latest_bltn: freshness.latest_bltn,
    }))
}

/// Status routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(status))
}
