//! Aggregate endpoints: board and author indexes, feeds, block index

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use pubrec_core::models::{AuthorSummary, BlockHead, BoardSummary, Bulletin};

use crate::http::error::ApiError;
use crate::http::extractors::ValidDay;
use crate::http::server::AppState;

/// GET /boards - every named board, oldest first
async fn list_boards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BoardSummary>>, ApiError> {
    Ok(Json(state.record.get_all_boards().await?))
}

/// GET /authors
async fn list_authors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AuthorSummary>>, ApiError> {
    Ok(Json(state.record.get_all_authors().await?))
}

/// GET /recent - bulletins confirmed in the last few blocks
async fn list_recent(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Bulletin>>, ApiError> {
    Ok(Json(state.record.get_recent(state.recent_window).await?))
}

/// GET /unconfirmed
async fn list_unconfirmed(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Bulletin>>, ApiError> {
    Ok(Json(state.record.get_unconfirmed().await?))
}

/// GET /blocks/{day} - 404 when the day has no blocks
async fn list_blocks_for_day(
    State(state): State<Arc<AppState>>,
    ValidDay(day): ValidDay,
) -> Result<Json<Vec<BlockHead>>, ApiError> {
    Ok(Json(state.record.get_blocks_for_day(day).await?))
}

/// Aggregate routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/boards", get(list_boards))
        .route("/authors", get(list_authors))
        .route("/recent", get(list_recent))
        .route("/unconfirmed", get(list_unconfirmed))
        .route("/blocks/{day}", get(list_blocks_for_day))
}
