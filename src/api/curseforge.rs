//! CurseForge API proxy.
//!
//! Pure forwarding with server-side API-key injection; the launcher
//! never sees the key. Upstream status codes pass through unchanged
//! except for connectivity failures (503).

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::header;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::CurseForgeConfig;
use crate::http::error::ApiError;
use crate::http::server::AppState;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetModsRequest {
    pub mod_ids: Vec<i64>,
    #[serde(default = "default_filter_pc_only")]
    pub filter_pc_only: bool,
}

fn default_filter_pc_only() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetModFilesRequest {
    pub file_ids: Vec<i64>,
}

/// Forwarding client for the CurseForge API.
pub struct CurseForgeProxy {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl CurseForgeProxy {
    pub fn new(config: &CurseForgeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, ApiError> {
        self.api_key
            .as_deref()
            .ok_or(ApiError::CurseForgeNotConfigured)
    }

    async fn forward_get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        self.client
            .get(format!("{}{path}", self.api_url))
            .header(API_KEY_HEADER, self.api_key()?)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(path, error = %e, "CurseForge request failed");
                ApiError::Upstream
            })
    }

    async fn forward_post(&self, path: &str, body: &Value) -> Result<reqwest::Response, ApiError> {
        self.client
            .post(format!("{}{path}", self.api_url))
            .header(API_KEY_HEADER, self.api_key()?)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(path, error = %e, "CurseForge request failed");
                ApiError::Upstream
            })
    }

    async fn into_json(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound("Mod not found".to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus(status.as_u16()));
        }
        response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "CurseForge returned invalid JSON");
            ApiError::Upstream
        })
    }

    /// Probe upstream connectivity via the `/games` endpoint.
    pub async fn probe(&self) -> Value {
        if !self.is_configured() {
            return json!({
                "status": "error",
                "message": "CurseForge API key not configured",
                "api_key_configured": false,
            });
        }

        match self.forward_get("/games").await {
            Ok(response) if response.status().is_success() => json!({
                "status": "ok",
                "message": "CurseForge API connection successful",
                "api_key_configured": true,
            }),
            Ok(response) => json!({
                "status": "error",
                "message": format!("CurseForge API returned status {}", response.status().as_u16()),
                "api_key_configured": true,
            }),
            Err(_) => json!({
                "status": "error",
                "message": "Failed to connect to CurseForge API",
                "api_key_configured": true,
            }),
        }
    }

    pub async fn mod_by_id(&self, mod_id: i64) -> Result<Value, ApiError> {
        let response = self.forward_get(&format!("/mods/{mod_id}")).await?;
        Self::into_json(response).await
    }

    pub async fn mods(&self, request: &GetModsRequest) -> Result<Value, ApiError> {
        let body = json!({
            "modIds": request.mod_ids,
            "filterPcOnly": request.filter_pc_only,
        });
        let response = self.forward_post("/mods", &body).await?;
        Self::into_json(response).await
    }

    pub async fn mod_files(&self, request: &GetModFilesRequest) -> Result<Value, ApiError> {
        let body = json!({ "fileIds": request.file_ids });
        let response = self.forward_post("/mods/files", &body).await?;
        Self::into_json(response).await
    }
}

/// `GET /v1/curseforge/test`
pub async fn test_connection(State(state): State<AppState>) -> Json<Value> {
    Json(state.curseforge.probe().await)
}

/// `GET /v1/curseforge/mods/{mod_id}`
pub async fn get_mod(
    State(state): State<AppState>,
    Path(mod_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.curseforge.mod_by_id(mod_id).await?))
}

/// `POST /v1/curseforge/mods`
pub async fn get_mods(
    State(state): State<AppState>,
    Json(request): Json<GetModsRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.mod_ids.is_empty() {
        return Err(ApiError::BadRequest("No mod IDs provided".to_string()));
    }
    Ok(Json(state.curseforge.mods(&request).await?))
}

/// `POST /v1/curseforge/mods/files`
pub async fn get_mod_files(
    State(state): State<AppState>,
    Json(request): Json<GetModFilesRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.file_ids.is_empty() {
        return Err(ApiError::BadRequest("No file IDs provided".to_string()));
    }
    Ok(Json(state.curseforge.mod_files(&request).await?))
}
