//! API error type and its JSON response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::data::DataError;

/// Errors surfaced by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("CurseForge API not configured")]
    CurseForgeNotConfigured,

    #[error("failed to connect to CurseForge API")]
    Upstream,

    #[error("CurseForge API error")]
    UpstreamStatus(u16),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::CurseForgeNotConfigured | ApiError::Upstream => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::UpstreamStatus(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DataError> for ApiError {
    fn from(error: DataError) -> Self {
        match error {
            DataError::ModpackNotFound(_) | DataError::LanguageNotSupported(_) => {
                ApiError::NotFound(error.to_string())
            }
            DataError::Io { .. } | DataError::Parse { .. } => {
                tracing::error!(error = %error, "Data load failed");
                ApiError::Internal("Failed to load data".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
