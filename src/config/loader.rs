//! Configuration loading from the process environment.

use std::env;
use std::str::FromStr;

use crate::config::schema::ApiConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Var { name: &'static str, value: String },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read an optional parsed value from the environment.
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Var { name, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Load and validate configuration from environment variables.
///
/// Every variable is optional; unset variables keep their defaults.
pub fn load_from_env() -> Result<ApiConfig, ConfigError> {
    let mut config = ApiConfig::default();

    if let Some(port) = parse_var("PORT")? {
        config.server.port = port;
    }
    if let Some(timeout) = parse_var("REQUEST_TIMEOUT_SECS")? {
        config.server.request_timeout_secs = timeout;
    }

    if let Ok(origins) = env::var("ALLOWED_ORIGINS") {
        config.cors.allowed_origins = parse_origin_list(&origins);
    }

    if let Some(window_ms) = parse_var("RATE_LIMIT_WINDOW_MS")? {
        config.rate_limit.window_ms = window_ms;
    }
    if let Some(max) = parse_var("RATE_LIMIT_MAX")? {
        config.rate_limit.max_requests = max;
    }

    if let Ok(url) = env::var("MINECRAFT_PROFILE_URL") {
        config.auth.verify_url = url;
    }
    if let Some(ttl) = parse_var("TOKEN_CACHE_TTL_SECS")? {
        config.auth.cache_ttl_secs = ttl;
    }

    if let Ok(key) = env::var("CURSEFORGE_API_KEY") {
        if !key.is_empty() {
            config.curseforge.api_key = Some(key);
        }
    }
    if let Ok(url) = env::var("CURSEFORGE_API_URL") {
        config.curseforge.api_url = url;
    }

    if let Ok(dir) = env::var("DATA_DIR") {
        config.data.dir = dir;
    }

    if let Some(enabled) = parse_var("METRICS_ENABLED")? {
        config.observability.metrics_enabled = enabled;
    }
    if let Ok(addr) = env::var("METRICS_ADDRESS") {
        config.observability.metrics_address = addr;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
