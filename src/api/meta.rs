//! Health, API info, and fallback handlers.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

const API_DESCRIPTION: &str =
    "Backend API for LuminaKraft Launcher - serves modpack data and launcher information";

const ENDPOINTS: [&str; 11] = [
    "GET /health - Health check",
    "GET /v1/modpacks - Get all modpacks (lightweight with language support)",
    "GET /v1/modpacks/list - List modpacks with basic info only",
    "GET /v1/modpacks/{id} - Get specific modpack with full details",
    "GET /v1/modpacks/{id}/features/{lang} - Get modpack features in specific language",
    "GET /v1/translations - Available languages",
    "GET /v1/translations/{lang} - Get translations for language",
    "GET /v1/curseforge/test - Test CurseForge API connection",
    "GET /v1/curseforge/* - CurseForge API proxy endpoints",
    "GET /v1/info - API information",
    "GET /metrics - Prometheus metrics (separate listener, optional)",
];

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": now_unix_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /v1/info`
pub async fn info() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": API_DESCRIPTION,
        "framework": "axum",
        "endpoints": ENDPOINTS,
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": "The requested endpoint does not exist",
            "availableEndpoints": [
                "/health",
                "/v1/modpacks",
                "/v1/modpacks/list",
                "/v1/modpacks/{id}",
                "/v1/modpacks/{id}/features/{lang}",
                "/v1/translations",
                "/v1/translations/{lang}",
                "/v1/curseforge/test",
                "/v1/curseforge/mods/{modId}",
                "/v1/curseforge/mods/files",
                "/v1/info",
            ],
        })),
    )
}
