//! LuminaKraft Launcher API Library

pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod http;
pub mod observability;

pub use auth::{AccessGate, Identity};
pub use config::ApiConfig;
pub use data::DataStore;
pub use http::HttpServer;
