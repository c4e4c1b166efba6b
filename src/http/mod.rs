//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack, graceful shutdown)
//!     → cors.rs (origin allowlist, preflight answers)
//!     → auth gate (protected sub-router only)
//!     → api handlers
//!     → error.rs (uniform JSON error bodies)
//! ```

pub mod cors;
pub mod error;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
