//! In-process store backed by `DashMap`s. Used by tests and `--in-memory` runs.
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use starboard_common::{Favorite, NewFavorite, UserId};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use super::{FavoriteStore, NewUser, UserRecord, UserStore};
use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Users keyed by email, which keeps emails unique
    users: Arc<DashMap<String, UserRecord>>,
    favorites: Arc<DashMap<i64, Favorite>>,
    next_user_id: Arc<AtomicI64>,
    next_favorite_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn select_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(email).map(|entry| entry.value().clone()))
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<NewUser, StoreError> {
        match self.users.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey),
            Entry::Vacant(slot) => {
                let id = UserId(self.next_user_id.fetch_add(1, Ordering::Relaxed) + 1);
                slot.insert(UserRecord {
                    id,
                    email: email.to_string(),
                    password_hash: password_hash.to_string(),
                });
                Ok(NewUser {
                    id,
                    email: email.to_string(),
                })
            },
        }
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn list_favorites(&self, owner: UserId) -> Result<Vec<Favorite>, StoreError> {
        let mut rows: Vec<Favorite> = self
            .favorites
            .iter()
            .filter(|entry| entry.user_id == owner)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|fav| fav.id);
        Ok(rows)
    }

    async fn insert_favorite(
        &self,
        owner: UserId,
        favorite: &NewFavorite,
    ) -> Result<Favorite, StoreError> {
        let id = self.next_favorite_id.fetch_add(1, Ordering::Relaxed) + 1;
        let row = Favorite {
            id,
            name: favorite.name.clone(),
            birth_year: favorite.birth_year.clone(),
            mass: favorite.mass.clone(),
            height: favorite.height.clone(),
            eye_color: favorite.eye_color.clone(),
            user_id: owner,
        };
        self.favorites.insert(id, row.clone());
        Ok(row)
    }

    async fn delete_favorite(&self, owner: UserId, id: i64) -> Result<Option<Favorite>, StoreError> {
        Ok(self
            .favorites
            .remove_if(&id, |_, fav| fav.user_id == owner)
            .map(|(_, fav)| fav))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luke() -> NewFavorite {
        NewFavorite {
            name: "Luke Skywalker".to_string(),
            birth_year: "19BBY".to_string(),
            mass: "77".to_string(),
            height: "172".to_string(),
            eye_color: "blue".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_select_user() {
        let store = MemoryStore::new();
        let created = store.insert_user("a@x.com", "$scrypt$hash").await.unwrap();
        assert_eq!(created.email, "a@x.com");

        let found = store.select_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$scrypt$hash");

        assert!(store.select_user_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_and_record_kept() {
        let store = MemoryStore::new();
        let first = store.insert_user("a@x.com", "first").await.unwrap();

        let err = store.insert_user("a@x.com", "second").await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateKey);

        let kept = store.select_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(kept.id, first.id);
        assert_eq!(kept.password_hash, "first");
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_user_ids_are_distinct() {
        let store = MemoryStore::new();
        let a = store.insert_user("a@x.com", "h").await.unwrap();
        let b = store.insert_user("b@x.com", "h").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_favorites_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let alice = UserId(1);
        let bob = UserId(2);

        let saved = store.insert_favorite(alice, &luke()).await.unwrap();
        assert_eq!(saved.user_id, alice);
        store.insert_favorite(alice, &luke()).await.unwrap();

        assert_eq!(store.list_favorites(alice).await.unwrap().len(), 2);
        assert!(store.list_favorites(bob).await.unwrap().is_empty());

        // Bob cannot delete Alice's row
        assert!(store.delete_favorite(bob, saved.id).await.unwrap().is_none());
        assert_eq!(store.list_favorites(alice).await.unwrap().len(), 2);

        let removed = store.delete_favorite(alice, saved.id).await.unwrap().unwrap();
        assert_eq!(removed.id, saved.id);
        assert_eq!(store.list_favorites(alice).await.unwrap().len(), 1);
    }
}
