//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicU32;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use luminakraft_api::{ApiConfig, HttpServer};

/// A mock Minecraft profile endpoint with a call counter.
pub struct MockVerifier {
    pub addr: SocketAddr,
    pub calls: Arc<AtomicU32>,
}

impl MockVerifier {
    pub fn profile_url(&self) -> String {
        format!("http://{}/minecraft/profile", self.addr)
    }
}

#[derive(Clone)]
struct VerifierState {
    /// bearer token -> (profile id, player name)
    valid: Arc<HashMap<String, (String, String)>>,
    calls: Arc<AtomicU32>,
}

async fn profile_handler(
    State(state): State<VerifierState>,
    headers: HeaderMap,
) -> axum::response::Response {
    state.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token.and_then(|t| state.valid.get(t)) {
        Some((id, name)) => Json(json!({ "id": id, "name": name })).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// Start a mock identity verifier accepting the given bearer tokens.
pub async fn start_mock_verifier(valid: HashMap<String, (String, String)>) -> MockVerifier {
    let calls = Arc::new(AtomicU32::new(0));
    let state = VerifierState {
        valid: Arc::new(valid),
        calls: calls.clone(),
    };

    let app = Router::new()
        .route("/minecraft/profile", get(profile_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockVerifier { addr, calls }
}

/// Write modpack and translation fixtures into a fresh temp directory.
pub fn write_fixture_data() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lk-api-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(dir.join("translations")).unwrap();

    std::fs::write(
        dir.join("modpacks.json"),
        r##"[
            {
                "id": "aether",
                "name": "Aether Reborn",
                "version": "1.2.0",
                "minecraftVersion": "1.20.1",
                "modloader": "forge",
                "modloaderVersion": "47.2.0",
                "gamemode": "survival",
                "logo": "https://cdn.example/aether/logo.png",
                "backgroundImage": "https://cdn.example/aether/bg.png",
                "primaryColor": "#8844ff",
                "isActive": true
            },
            {
                "id": "skyfall",
                "name": "Skyfall",
                "version": "0.9.1",
                "minecraftVersion": "1.21",
                "modloader": "fabric",
                "modloaderVersion": "0.16.0",
                "gamemode": "skyblock",
                "logo": "https://cdn.example/skyfall/logo.png",
                "backgroundImage": "https://cdn.example/skyfall/bg.png",
                "primaryColor": "#22ccee",
                "isComingSoon": true
            }
        ]"##,
    )
    .unwrap();

    std::fs::write(
        dir.join("translations/en.json"),
        r#"{
            "modpacks": {
                "aether": {
                    "name": "Aether Reborn",
                    "description": "Explore floating islands.",
                    "shortDescription": "Floating islands"
                }
            },
            "features": {
                "aether": [{"title": "Dungeons", "description": "Procedural dungeons"}]
            },
            "ui": {
                "status": {"active": "Active"},
                "modloader": {"forge": "Forge"},
                "gamemode": {"survival": "Survival"}
            }
        }"#,
    )
    .unwrap();

    std::fs::write(
        dir.join("translations/es.json"),
        r#"{
            "modpacks": {
                "aether": {
                    "name": "Aether Renacido",
                    "description": "Explora islas flotantes.",
                    "shortDescription": "Islas flotantes"
                }
            },
            "features": {},
            "ui": {
                "status": {"active": "Activo"},
                "modloader": {"forge": "Forge"},
                "gamemode": {"survival": "Supervivencia"}
            }
        }"#,
    )
    .unwrap();

    dir
}

/// Config pointing at the fixture data, with test-friendly limits.
pub fn test_config(data_dir: &Path) -> ApiConfig {
    let mut config = ApiConfig::default();
    config.data.dir = data_dir.to_string_lossy().into_owned();
    config.rate_limit.window_ms = 60_000;
    config.rate_limit.max_requests = 1_000;
    config
}

/// Start the API server on an ephemeral port.
pub async fn start_api(config: ApiConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });
    addr
}

/// HTTP client that ignores any system proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
