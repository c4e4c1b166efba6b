//! Configuration schema definitions.
//!
//! All types derive Serde traits so a config can also be dumped for
//! diagnostics. Every section has a `Default` matching production
//! settings.

use serde::{Deserialize, Serialize};

/// Root configuration for the launcher API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// HTTP server settings (bind address, timeouts).
    pub server: ServerConfig,

    /// CORS origin allowlist.
    pub cors: CorsConfig,

    /// Global request quota per identity.
    pub rate_limit: RateLimitConfig,

    /// Token verification settings.
    pub auth: AuthConfig,

    /// CurseForge proxy settings.
    pub curseforge: CurseForgeConfig,

    /// Static data directory.
    pub data: DataConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Bind address derived from the configured port.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 9374,
            request_timeout_secs: 30,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Browser origins allowed to call the API. Requests without an
    /// Origin header (non-browser clients) always pass.
    pub allowed_origins: Vec<String>,
}

/// Request quota configuration. One global policy applies to every
/// protected endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window length in milliseconds.
    pub window_ms: u64,

    /// Maximum requests per identity per window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: 60_000,
            max_requests: 180,
        }
    }
}

/// Token verification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Minecraft profile endpoint used to verify bearer tokens.
    pub verify_url: String,

    /// Timeout for the verification call in seconds.
    pub verify_timeout_secs: u64,

    /// How long a successful verification is cached, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            verify_url: "https://api.minecraftservices.com/minecraft/profile".to_string(),
            verify_timeout_secs: 5,
            cache_ttl_secs: 300,
        }
    }
}

/// CurseForge proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CurseForgeConfig {
    /// Server-side API key injected into proxied requests.
    pub api_key: Option<String>,

    /// Base URL of the CurseForge API.
    pub api_url: String,

    /// Timeout for proxied calls in seconds.
    pub timeout_secs: u64,
}

impl Default for CurseForgeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.curseforge.com/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Static data configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding `modpacks.json` and `translations/*.json`.
    pub dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
