//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::ResolveError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Resource not found
    NotFound(String),
    /// Resolution pipeline failure
    Resolve(ResolveError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::Resolve(e) => resolve_response(e),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

fn resolve_response(err: ResolveError) -> (StatusCode, ApiError) {
    let message = err.to_string();
    match err {
        ResolveError::Input(_) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", message)),
        ResolveError::NotFound(_) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message)),
        ResolveError::UpstreamTimeout(_) => (
            StatusCode::GATEWAY_TIMEOUT,
            ApiError::new("UPSTREAM_TIMEOUT", message),
        ),
        ResolveError::Upstream(_) => (
            StatusCode::BAD_GATEWAY,
            ApiError::new("UPSTREAM_ERROR", message),
        ),
        ResolveError::DataIntegrity(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("DATA_INTEGRITY", message),
        ),
        ResolveError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("STORE_ERROR", message),
        ),
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        AppError::Resolve(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
