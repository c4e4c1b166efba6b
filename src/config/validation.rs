//! Semantic configuration validation.
//!
//! Serde/parse errors are caught by the loader; this module checks
//! values that parse fine but make no operational sense.

use url::Url;

use crate::config::schema::ApiConfig;

/// A single validation failure.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Validate a loaded configuration. Collects every failure rather than
/// stopping at the first.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(err("server.port", "must be nonzero"));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(err("server.request_timeout_secs", "must be nonzero"));
    }

    if config.rate_limit.window_ms == 0 {
        errors.push(err("rate_limit.window_ms", "must be nonzero"));
    }
    if config.rate_limit.max_requests == 0 {
        errors.push(err("rate_limit.max_requests", "must be nonzero"));
    }

    if Url::parse(&config.auth.verify_url).is_err() {
        errors.push(err("auth.verify_url", "must be a valid URL"));
    }
    if config.auth.verify_timeout_secs == 0 {
        errors.push(err("auth.verify_timeout_secs", "must be nonzero"));
    }

    if Url::parse(&config.curseforge.api_url).is_err() {
        errors.push(err("curseforge.api_url", "must be a valid URL"));
    }

    if config.data.dir.is_empty() {
        errors.push(err("data.dir", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
