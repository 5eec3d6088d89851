// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication: credential hashing, bearer tokens and the
//! register/login/authenticate gate built on them.

pub mod password;
mod service;
mod service_impl;
pub mod token;

pub use password::CredentialHasher;
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token::{TokenClaims, TokenCodec};
