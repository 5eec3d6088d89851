//! HTTP route handlers.

pub mod auth;
pub mod characters;
pub mod favorites;
