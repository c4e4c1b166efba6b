//! Authentication and quota subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → gate.rs (extract credentials, authorize, attach Identity)
//!     → identity.rs (resolve Microsoft bearer tokens, verification cache)
//!     → token.rs (validate launcher-issued opaque tokens by shape)
//!     → quota.rs (fixed-window request counting per identity)
//!     → Handler runs with `Identity` available in request extensions
//! ```
//!
//! # Design Decisions
//! - Two credential schemes normalize into one `Identity`; opaque-token
//!   ids carry a namespace prefix so the schemes can never collide
//! - Resolution strategies are tried in order and return `Option`,
//!   never errors, so a failed bearer verification silently falls
//!   through to the launcher-token path
//! - Quota state is per-identity and serialized per key; requests for
//!   different identities never block each other

pub mod error;
pub mod gate;
pub mod identity;
pub mod quota;
pub mod token;

pub use error::AuthError;
pub use gate::{auth_middleware, AccessGate};
pub use identity::{Credentials, Identity, IdentityResolver};
pub use quota::{Admission, QuotaTracker};
