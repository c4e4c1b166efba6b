//! CORS middleware with an explicit origin allowlist.
//!
//! # Design Decisions
//! - Requests without an `Origin` header (launcher, curl, server to
//!   server) always pass and get a wildcard allow header
//! - Listed browser origins get the origin echoed back with
//!   credentials allowed; anything else is rejected with 400
//! - Preflights are answered directly without running the handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum::Json;
use serde_json::json;

const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type,Authorization,x-lk-token,x-luminakraft-token,Cache-Control,Accept,If-None-Match,If-Modified-Since,X-Requested-With";

/// Shared allowlist for the CORS middleware.
#[derive(Clone)]
pub struct CorsState {
    allowed_origins: Arc<Vec<String>>,
}

impl CorsState {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self {
            allowed_origins: Arc::new(allowed_origins),
        }
    }

    fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

pub async fn cors_middleware(
    State(state): State<CorsState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match origin {
        None => {
            let mut response = next.run(request).await;
            response.headers_mut().insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            );
            response
        }
        Some(origin) if state.is_allowed(&origin) => {
            let is_preflight = request.method() == Method::OPTIONS;
            let mut response = if is_preflight {
                StatusCode::NO_CONTENT.into_response()
            } else {
                next.run(request).await
            };

            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&origin) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
            if is_preflight {
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOWED_METHODS),
                );
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOWED_HEADERS),
                );
            }
            response
        }
        Some(origin) => {
            tracing::debug!(origin, "Rejected disallowed CORS origin");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Bad Request",
                    "message": "CORS origin not allowed",
                })),
            )
                .into_response()
        }
    }
}
