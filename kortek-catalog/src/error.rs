//! Error types for kortek-catalog
//!
//! Every handler failure is rendered as `{"error": {"code", "message"}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::source::FetchError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found, or rejected by validation (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// No active catalog source (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Upstream fetch failed (502, or 404 when the upstream said so)
    #[error("Upstream error: {0}")]
    Upstream(#[from] FetchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", msg)
            }
            ApiError::Upstream(FetchError::Status { status: 404, ref url }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Upstream has no resource at {}", url),
            ),
            ApiError::Upstream(ref err) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
