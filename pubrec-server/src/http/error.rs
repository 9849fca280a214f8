//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pubrec_core::RecordError;
use serde_json::json;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found, or a path parameter failed its pattern (404)
    NotFound { resource: &'static str, id: String },

    /// Blacklisted bulletin requested directly (451)
    Censored { txid: String },

    /// Undecodable board name or impossible day (400)
    Malformed { field: &'static str, reason: String },

    /// Store failure (500, logged)
    Store(RecordError),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Censored { .. } => StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS,
            Self::Malformed { .. } => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::Censored { txid } => json!({
                "error": "censored",
                "message": format!("bulletin {} has been withheld", txid)
            }),
            Self::Malformed { field, reason } => json!({
                "error": "malformed_input",
                "message": format!("{}: {}", field, reason)
            }),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::NotFound { resource, id } => Self::NotFound { resource, id },
            RecordError::Censored { txid } => Self::Censored { txid },
            RecordError::MalformedInput { field, reason } => Self::Malformed { field, reason },
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(RecordError::not_found("bulletin", "abc"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn censored_is_451() {
        let err = ApiError::from(RecordError::censored("b0a1"));
        let response = err.into_response();
        assert_eq!(response.status().as_u16(), 451);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "censored");
    }

    #[tokio::test]
    async fn malformed_is_400() {
        let err = ApiError::from(RecordError::malformed("day", "no such date"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_error_hides_details() {
        let err = ApiError::from(RecordError::Store(sqlx_error()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "an internal error occurred");
    }

    fn sqlx_error() -> sqlx::Error {
        sqlx::Error::PoolClosed
    }
}
