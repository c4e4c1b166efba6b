//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, CORS, metrics)
//! - Apply the access gate to the protected sub-router
//! - Spawn the verification-cache sweeper
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::Request,
    middleware,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api;
use crate::api::curseforge::CurseForgeProxy;
use crate::auth::{auth_middleware, AccessGate};
use crate::config::ApiConfig;
use crate::data::DataStore;
use crate::http::cors::{cors_middleware, CorsState};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AccessGate>,
    pub store: Arc<DataStore>,
    pub curseforge: Arc<CurseForgeProxy>,
}

/// HTTP server for the launcher API.
pub struct HttpServer {
    router: Router,
    config: ApiConfig,
    gate: Arc<AccessGate>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        let gate = Arc::new(AccessGate::new(&config));
        let store = Arc::new(DataStore::new(&config.data));
        let curseforge = Arc::new(CurseForgeProxy::new(&config.curseforge));

        let state = AppState {
            gate: gate.clone(),
            store,
            curseforge,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            gate,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ApiConfig, state: AppState) -> Router {
        let protected = Router::new()
            .route("/v1/modpacks", get(api::modpacks::list_modpacks))
            .route("/v1/modpacks/list", get(api::modpacks::list_basic))
            .route("/v1/modpacks/{id}", get(api::modpacks::get_modpack))
            .route(
                "/v1/modpacks/{id}/features/{lang}",
                get(api::modpacks::get_modpack_features),
            )
            .route(
                "/v1/translations/{lang}",
                get(api::translations::get_translations),
            )
            .route("/v1/curseforge/test", get(api::curseforge::test_connection))
            .route(
                "/v1/curseforge/mods/{mod_id}",
                get(api::curseforge::get_mod),
            )
            .route("/v1/curseforge/mods", post(api::curseforge::get_mods))
            .route(
                "/v1/curseforge/mods/files",
                post(api::curseforge::get_mod_files),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            ));

        let cors = CorsState::new(config.cors.allowed_origins.clone());

        Router::new()
            .route("/health", get(api::meta::health))
            .route("/v1/info", get(api::meta::info))
            .route(
                "/v1/translations",
                get(api::translations::available_languages),
            )
            .merge(protected)
            .fallback(api::meta::not_found)
            .with_state(state)
            .layer(middleware::from_fn_with_state(cors, cors_middleware))
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(middleware::from_fn(track_metrics))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        // Periodic sweep keeps the verification cache bounded under
        // sustained unique-credential traffic.
        let gate = self.gate.clone();
        let sweep_period = Duration::from_secs(self.config.auth.cache_ttl_secs.max(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(sweep_period);
            interval.tick().await;
            loop {
                interval.tick().await;
                gate.resolver().sweep_expired();
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

/// Record method, status, and latency for every request.
async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
