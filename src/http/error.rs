use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::schemas::ErrorResponse;

/// Request errors rejected before reaching the lock manager.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `client` query parameter absent or empty.
    #[error("client parameter required")]
    MissingClient,

    /// `ttl` query parameter unparseable or not positive.
    #[error("invalid ttl format")]
    InvalidTtl(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::InvalidTtl(raw) = &self {
            tracing::debug!(ttl = %raw, "rejected ttl");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
