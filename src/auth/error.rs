//! Authentication error taxonomy and its HTTP mapping.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Terminal outcomes of the access gate.
///
/// An unreachable verifier is deliberately not a distinct variant: the
/// launcher-token path may still succeed, and only when both paths fail
/// does the request degrade to `InvalidCredential`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing or invalid authentication token")]
    InvalidCredential,

    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}

impl AuthError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidCredential => "invalid_credential",
            AuthError::RateLimited { .. } => "rate_limited",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Unauthorized",
                    "message": "Missing or invalid authentication token",
                })),
            )
                .into_response(),
            AuthError::RateLimited { retry_after_secs } => {
                let body = Json(json!({
                    "error": "Too Many Requests",
                    "message": "Rate limit exceeded. Please try again later.",
                    "resetInSeconds": retry_after_secs,
                }));
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after_secs.to_string())],
                    body,
                )
                    .into_response()
            }
        }
    }
}
