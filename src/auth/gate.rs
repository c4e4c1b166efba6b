//! Access gate: the single entry point for protected requests.
//!
//! Composes [`IdentityResolver`] and [`QuotaTracker`]. Every protected
//! handler sits behind [`auth_middleware`], which authorizes the
//! request and attaches the resolved [`Identity`] to its extensions.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::error::AuthError;
use crate::auth::identity::{Credentials, Identity, IdentityResolver};
use crate::auth::quota::{Admission, QuotaTracker};
use crate::config::ApiConfig;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Composes identity resolution and quota admission.
///
/// Constructed once at startup and shared via the application state.
/// All of its state (verification cache, quota windows) is process
/// lifetime only and lost on restart.
pub struct AccessGate {
    resolver: IdentityResolver,
    quota: QuotaTracker,
}

impl AccessGate {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            resolver: IdentityResolver::new(&config.auth),
            quota: QuotaTracker::new(&config.rate_limit),
        }
    }

    /// Authorize one request: resolve credentials, then admit against
    /// the quota. Single pass, no retries; both failure modes are
    /// terminal for the request.
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let credentials = Credentials::from_headers(headers);
        let identity = self.resolver.resolve(&credentials).await?;

        match self.quota.admit(&identity.id) {
            Admission::Allowed => Ok(identity),
            Admission::Limited { retry_after_secs } => {
                tracing::warn!(user = %identity.id, retry_after_secs, "Rate limit exceeded");
                Err(AuthError::RateLimited { retry_after_secs })
            }
        }
    }

    /// Access to the resolver, for the periodic cache sweep.
    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }
}

/// Axum middleware guarding the protected sub-router.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match state.gate.authorize(request.headers()).await {
        Ok(identity) => {
            tracing::debug!(user = %identity.id, "Request authorized");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(error) => {
            metrics::record_auth_rejected(error.kind());
            error.into_response()
        }
    }
}
