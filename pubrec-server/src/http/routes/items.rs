//! Single-item endpoints: bulletins, blocks, authors, boards, blacklist

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use pubrec_core::models::{AuthorResponse, BannedBulletin, BlockResponse, Bulletin, WholeBoard};

use crate::http::error::ApiError;
use crate::http::extractors::{RawBoard, ValidAddress, ValidHash};
use crate::http::server::AppState;

/// GET /bulletin/{txid}
async fn get_bulletin(
    State(state): State<Arc<AppState>>,
    ValidHash(txid): ValidHash,
) -> Result<Json<Bulletin>, ApiError> {
    Ok(Json(state.record.get_bulletin(&txid).await?))
}

/// GET /block/{hash}
async fn get_block(
    State(state): State<Arc<AppState>>,
    ValidHash(hash): ValidHash,
) -> Result<Json<BlockResponse>, ApiError> {
    Ok(Json(state.record.get_block(&hash).await?))
}

/// GET /author/{addr}
async fn get_author(
    State(state): State<Arc<AppState>>,
    ValidAddress(addr): ValidAddress,
) -> Result<Json<AuthorResponse>, ApiError> {
    Ok(Json(state.record.get_author(&addr).await?))
}

/// GET /board/{*board} - board segment is passed through still encoded
async fn get_board(
    State(state): State<Arc<AppState>>,
    RawBoard(raw): RawBoard,
) -> Result<Json<WholeBoard>, ApiError> {
    Ok(Json(state.record.get_board(&raw).await?))
}

/// GET /nilboard - bulletins posted without a board
async fn get_nil_board(State(state): State<Arc<AppState>>) -> Result<Json<WholeBoard>, ApiError> {
    Ok(Json(state.record.get_nil_board().await?))
}

/// GET /blacklist
async fn get_blacklist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BannedBulletin>>, ApiError> {
    Ok(Json(state.record.get_blacklist().await?))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bulletin/{txid}", get(get_bulletin))
        .route("/block/{hash}", get(get_block))
        .route("/author/{addr}", get(get_author))
        .route("/board/{*board}", get(get_board))
        .route("/nilboard", get(get_nil_board))
        .route("/noboard", get(get_nil_board))
        .route("/blacklist", get(get_blacklist))
}
