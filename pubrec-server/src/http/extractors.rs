//! Custom Axum extractors
//!
//! Each extractor checks its path segment against the pattern the route
//! accepts. A segment that fails is reported as 404, the same answer a
//! router gives for a path it never matched.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use once_cell::sync::Lazy;
use pubrec_core::models::Day;
use regex::Regex;

use super::error::ApiError;

static SHA256_HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-fA-F0-9]{64}$").unwrap());

static ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]{30,35}$").unwrap());

static DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,2}-[0-9]{1,2}-[0-9]{4}$").unwrap());

/// Percent-encoded board segments get room for three bytes per character.
const MAX_BOARD_SEGMENT: usize = 90;

async fn segment<S>(parts: &mut Parts, state: &S, resource: &'static str) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let path = parts.uri.path().to_string();
    let Path(value): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| ApiError::not_found(resource, path))?;
    Ok(value)
}

/// A 64 character hex txid or block hash
pub struct ValidHash(pub String);

impl<S> FromRequestParts<S> for ValidHash
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let value = segment(parts, state, "hash").await?;
        if !SHA256_HEX.is_match(&value) {
            return Err(ApiError::not_found("hash", value));
        }
        Ok(Self(value))
    }
}

/// A base58 author address
pub struct ValidAddress(pub String);

impl<S> FromRequestParts<S> for ValidAddress
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let value = segment(parts, state, "author").await?;
        if !ADDRESS.is_match(&value) {
            return Err(ApiError::not_found("author", value));
        }
        Ok(Self(value))
    }
}

/// A `D-M-YYYY` day. Shape mismatches are 404; impossible dates such as
/// `31-02-2014` are malformed input (400).
pub struct ValidDay(pub Day);

impl<S> FromRequestParts<S> for ValidDay
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let value = segment(parts, state, "day").await?;
        if !DAY.is_match(&value) {
            return Err(ApiError::not_found("day", value));
        }
        Ok(Self(Day::parse(&value)?))
    }
}

/// The board segment exactly as it appeared on the wire.
///
/// Axum's `Path` would percent-decode it, so the raw text is cut from the
/// request URI instead. The route is a catch-all because encoded board
/// names may contain a literal `/`.
pub struct RawBoard(pub String);

impl<S> FromRequestParts<S> for RawBoard
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path();
        let raw = path
            .strip_prefix("/board/")
            .ok_or_else(|| ApiError::not_found("board", path))?;

        let len = raw.chars().count();
        if len == 0 || len > MAX_BOARD_SEGMENT {
            return Err(ApiError::not_found("board", raw));
        }
        Ok(Self(raw.to_string()))
    }
}
