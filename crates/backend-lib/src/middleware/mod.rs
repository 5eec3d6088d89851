// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the Starboard HTTP API.

pub mod auth;

pub use auth::{bearer_token, require_auth, AuthContext};
