//! LuminaKraft Launcher API
//!
//! Backend API for the LuminaKraft launcher, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                 LAUNCHER API                     │
//!                 │                                                  │
//!  Client Request │  ┌─────────┐   ┌───────────┐   ┌─────────────┐  │
//!  ───────────────┼─▶│  http   │──▶│ auth gate │──▶│ api handlers│  │
//!                 │  │ server  │   │ (identity │   │ (modpacks,  │  │
//!                 │  └─────────┘   │  + quota) │   │ translations│  │
//!                 │                └─────┬─────┘   │  curseforge)│  │
//!                 │                      │         └──────┬──────┘  │
//!                 │                      ▼                ▼         │
//!                 │              ┌──────────────┐  ┌────────────┐   │
//!                 │              │ verification │  │ data store │   │
//!                 │              │ cache + quota│  │ + CF proxy │   │
//!                 │              │   windows    │  └────────────┘   │
//!                 │              └──────────────┘                   │
//!                 │                                                 │
//!                 │  Cross-cutting: config, observability, CORS     │
//!                 └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use luminakraft_api::config::{self, loader::ConfigError};
use luminakraft_api::config::validation::validate_config;
use luminakraft_api::observability::{logging, metrics};
use luminakraft_api::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "luminakraft-api", version, about = "LuminaKraft Launcher backend API")]
struct Cli {
    /// Port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Data directory (overrides DATA_DIR).
    #[arg(long)]
    data_dir: Option<String>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "luminakraft_api=debug,tower_http=debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init_tracing(&cli.log_level);
    tracing::info!("luminakraft-api v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = config::load_from_env()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        bind_address = %config.server.bind_address(),
        data_dir = %config.data.dir,
        rate_limit_window_ms = config.rate_limit.window_ms,
        rate_limit_max = config.rate_limit.max_requests,
        curseforge_configured = config.curseforge.api_key.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
