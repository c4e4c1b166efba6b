//! Identity resolution for the two supported credential schemes.
//!
//! # Responsibilities
//! - Extract credentials from request headers
//! - Verify Microsoft bearer tokens against the Minecraft profile API
//! - Cache verified identities for a short TTL to avoid repeated
//!   remote calls
//! - Fall back to launcher-token validation when verification fails
//!
//! # Design Decisions
//! - The cache is keyed by the raw bearer token; entries are only ever
//!   inserted on successful verification, so a timed-out call leaves
//!   no partial state behind
//! - Stale entries are treated as misses and reclaimed by a periodic
//!   sweep, keeping the map bounded under unique-credential traffic

use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use dashmap::DashMap;
use serde::Deserialize;

use crate::auth::error::AuthError;
use crate::auth::token::validate_opaque_token;
use crate::config::AuthConfig;
use crate::observability::metrics;

/// Custom headers carrying the launcher token, checked in order.
pub const LAUNCHER_TOKEN_HEADERS: [&str; 2] = ["x-lk-token", "x-luminakraft-token"];

/// Canonical user identity shared by both credential schemes.
///
/// `id` is the sole key used for quota tracking and caching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
}

/// Credentials extracted from an incoming request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Microsoft access token from `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// Launcher-issued opaque token from the custom headers.
    pub launcher_token: Option<String>,
}

impl Credentials {
    /// Extract credentials from request headers. First launcher-token
    /// header match wins.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(strip_bearer_scheme)
            .map(|v| v.to_string());

        let launcher_token = LAUNCHER_TOKEN_HEADERS
            .iter()
            .find_map(|name| headers.get(*name))
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        Self {
            bearer,
            launcher_token,
        }
    }
}

/// Strip the bearer auth scheme from an `Authorization` value.
/// HTTP auth schemes are case-insensitive, so `bearer` and `BEARER`
/// are accepted alongside the canonical `Bearer`.
fn strip_bearer_scheme(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim_start())
    } else {
        None
    }
}

/// A verified identity with its cache expiry.
#[derive(Debug, Clone)]
struct CachedIdentity {
    identity: Identity,
    expires_at: Instant,
}

/// Subset of the Minecraft profile response we rely on.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    id: String,
    name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum VerifyError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("verifier returned status {0}")]
    Status(u16),
    #[error("profile response missing id")]
    MissingId,
}

/// Resolves request credentials into a canonical [`Identity`].
pub struct IdentityResolver {
    client: reqwest::Client,
    verify_url: String,
    cache_ttl: Duration,
    cache: DashMap<String, CachedIdentity>,
}

impl IdentityResolver {
    pub fn new(config: &AuthConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.verify_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            verify_url: config.verify_url.clone(),
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            cache: DashMap::new(),
        }
    }

    /// Resolve credentials into an identity.
    ///
    /// Resolution strategies run in order, short-circuiting on the
    /// first success: verified bearer token, then launcher token.
    /// A failed or timed-out verification is not an error in itself;
    /// only exhausting both paths yields [`AuthError::InvalidCredential`].
    pub async fn resolve(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        if let Some(bearer) = &credentials.bearer {
            if let Some(identity) = self.resolve_bearer(bearer).await {
                return Ok(identity);
            }
        }

        if let Some(token) = &credentials.launcher_token {
            if let Some(identity) = validate_opaque_token(token) {
                return Ok(identity);
            }
        }

        Err(AuthError::InvalidCredential)
    }

    /// Resolve a bearer token, consulting the verification cache first.
    async fn resolve_bearer(&self, bearer: &str) -> Option<Identity> {
        if let Some(entry) = self.cache.get(bearer) {
            if entry.expires_at > Instant::now() {
                metrics::record_verifier_cache(true);
                return Some(entry.identity.clone());
            }
        }
        metrics::record_verifier_cache(false);

        match self.verify_remote(bearer).await {
            Ok(identity) => {
                self.cache.insert(
                    bearer.to_string(),
                    CachedIdentity {
                        identity: identity.clone(),
                        expires_at: Instant::now() + self.cache_ttl,
                    },
                );
                Some(identity)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token verification failed");
                None
            }
        }
    }

    /// Call the remote profile endpoint to verify a bearer token.
    async fn verify_remote(&self, bearer: &str) -> Result<Identity, VerifyError> {
        let response = self
            .client
            .get(&self.verify_url)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VerifyError::Status(response.status().as_u16()));
        }

        let profile: ProfileResponse = response.json().await?;
        if profile.id.is_empty() {
            return Err(VerifyError::MissingId);
        }

        Ok(Identity {
            id: profile.id,
            display_name: profile.name.unwrap_or_else(|| "MinecraftUser".to_string()),
        })
    }

    /// Drop expired cache entries. Called periodically by the server.
    pub fn sweep_expired(&self) {
        let now = Instant::now();
        // Count removals inside the closure; verifications insert
        // concurrently, so comparing map lengths is unreliable.
        let mut swept = 0usize;
        self.cache.retain(|_, entry| {
            let keep = entry.expires_at > now;
            if !keep {
                swept += 1;
            }
            keep
        });
        if swept > 0 {
            tracing::debug!(swept, remaining = self.cache.len(), "Swept expired token cache entries");
        }
    }

    /// Number of cached verifications (live or stale).
    pub fn cached_tokens(&self) -> usize {
        self.cache.len()
    }
}
