//! API route handlers.
//!
//! Handlers are thin: they authorize via the gate middleware (already
//! applied by the router), pull data from the store or proxy, and
//! shape the response for the endpoint.

pub mod curseforge;
pub mod meta;
pub mod modpacks;
pub mod translations;

pub use curseforge::CurseForgeProxy;
