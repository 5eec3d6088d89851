// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core functionality for the Starboard backend: authentication,
//! per-user favorites and the catalog search proxy.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthService, CredentialHasher, DefaultAuth, TokenCodec};
use crate::catalog::CatalogClient;
use crate::config::Settings;
use crate::storage::{FavoriteStore, MemoryStore, UserStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Favorites backend
    pub favorites: Arc<dyn FavoriteStore>,
    /// Catalog API client
    pub catalog: Arc<CatalogClient>,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state over the given stores
    pub fn new(
        settings: Settings,
        users: Arc<dyn UserStore>,
        favorites: Arc<dyn FavoriteStore>,
    ) -> anyhow::Result<Self> {
        settings.validate()?;

        let hasher = CredentialHasher::new(settings.auth.scrypt_log_n)?;
        let codec = TokenCodec::from_settings(&settings.auth)?;
        let auth = DefaultAuth::new(users, hasher, codec, settings.auth.token_ttl())?;
        let catalog = CatalogClient::new(&settings.catalog)?;

        Ok(Self {
            auth: Arc::new(auth),
            favorites,
            catalog: Arc::new(catalog),
            settings: Arc::new(settings),
        })
    }

    /// Create a new application state backed by a fresh `MemoryStore`
    pub fn in_memory(settings: Settings) -> anyhow::Result<Self> {
        let store = Arc::new(MemoryStore::new());
        Self::new(settings, store.clone(), store)
    }
}
