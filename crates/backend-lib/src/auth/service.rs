// =============
// crates/backend-lib/src/auth/service.rs
// =============
//! This module defines the `AuthService` trait, which is used for authentication
use async_trait::async_trait;
use starboard_common::{AuthResponse, Credentials, UserId};

use crate::error::AuthError;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and return its public fields with a fresh token
    async fn register(&self, credentials: Credentials) -> Result<AuthResponse, AuthError>;

    /// Check credentials and return a fresh token.
    /// Unknown email and wrong password fail identically.
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, AuthError>;

    /// Resolve a bearer token to the user it was issued for
    fn authenticate(&self, token: &str) -> Result<UserId, AuthError>;
}
