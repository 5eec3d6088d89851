// ============================
// crates/backend-lib/src/storage/mod.rs
// ============================
//! Store interfaces consumed by the auth gate and the favorites handlers,
//! with in-memory and PostgreSQL implementations.
use async_trait::async_trait;
use starboard_common::{Favorite, NewFavorite, UserId};

use crate::error::StoreError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A registered user as held by the store. Never serialized to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
}

/// Public fields returned by a successful insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub email: String,
}

/// User persistence used by the auth gate
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look a user up by exact email
    async fn select_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a user; fails with `StoreError::DuplicateKey` if the email is taken
    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<NewUser, StoreError>;
}

/// Per-owner favorites persistence
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All favorites belonging to `owner`, oldest first
    async fn list_favorites(&self, owner: UserId) -> Result<Vec<Favorite>, StoreError>;

    /// Save a favorite for `owner` and return the stored row
    async fn insert_favorite(
        &self,
        owner: UserId,
        favorite: &NewFavorite,
    ) -> Result<Favorite, StoreError>;

    /// Delete favorite `id` if it belongs to `owner`
    async fn delete_favorite(&self, owner: UserId, id: i64) -> Result<Option<Favorite>, StoreError>;
}
