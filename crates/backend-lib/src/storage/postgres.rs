//! PostgreSQL store over `tokio-postgres`.
use async_trait::async_trait;
use starboard_common::{Favorite, NewFavorite, UserId};
use std::sync::Arc;
use tokio_postgres::{error::SqlState, Client, NoTls, Row};

use super::{FavoriteStore, NewUser, UserRecord, UserStore};
use crate::error::StoreError;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id    BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        hash  TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS favorites (
        id         BIGSERIAL PRIMARY KEY,
        name       TEXT NOT NULL,
        birth_year TEXT NOT NULL DEFAULT '',
        mass       TEXT NOT NULL DEFAULT '',
        height     TEXT NOT NULL DEFAULT '',
        eye_color  TEXT NOT NULL DEFAULT '',
        user_id    BIGINT NOT NULL REFERENCES users(id)
    );
";

const FAVORITE_COLUMNS: &str = "id, name, birth_year, mass, height, eye_color, user_id";

#[derive(Clone)]
pub struct PgStore {
    client: Arc<Client>,
}

impl PgStore {
    /// Connect and drive the connection on a background task
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        tracing::info!("connecting to database");
        let (client, connection) = tokio_postgres::connect(url, NoTls)
            .await
            .map_err(map_pg_error)?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "database connection closed");
            }
        });
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create the `users` and `favorites` tables if they are missing
    pub async fn migrate(&self) -> Result<(), StoreError> {
        self.client
            .batch_execute(SCHEMA)
            .await
            .map_err(map_pg_error)
    }
}

fn map_pg_error(err: tokio_postgres::Error) -> StoreError {
    if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
        StoreError::DuplicateKey
    } else {
        StoreError::Backend(err.to_string())
    }
}

fn favorite_from_row(row: &Row) -> Favorite {
    Favorite {
        id: row.get("id"),
        name: row.get("name"),
        birth_year: row.get("birth_year"),
        mass: row.get("mass"),
        height: row.get("height"),
        eye_color: row.get("eye_color"),
        user_id: UserId(row.get("user_id")),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn select_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = self
            .client
            .query_opt("SELECT id, email, hash FROM users WHERE email = $1", &[&email])
            .await
            .map_err(map_pg_error)?;

        Ok(row.map(|row| UserRecord {
            id: UserId(row.get("id")),
            email: row.get("email"),
            password_hash: row.get("hash"),
        }))
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<NewUser, StoreError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO users (email, hash) VALUES ($1, $2) RETURNING id, email",
                &[&email, &password_hash],
            )
            .await
            .map_err(map_pg_error)?;

        Ok(NewUser {
            id: UserId(row.get("id")),
            email: row.get("email"),
        })
    }
}

#[async_trait]
impl FavoriteStore for PgStore {
    async fn list_favorites(&self, owner: UserId) -> Result<Vec<Favorite>, StoreError> {
        let sql = format!("SELECT {FAVORITE_COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY id");
        let rows = self
            .client
            .query(&sql, &[&owner.0])
            .await
            .map_err(map_pg_error)?;
        Ok(rows.iter().map(favorite_from_row).collect())
    }

    async fn insert_favorite(
        &self,
        owner: UserId,
        favorite: &NewFavorite,
    ) -> Result<Favorite, StoreError> {
        let sql = format!(
            "INSERT INTO favorites (name, birth_year, mass, height, eye_color, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {FAVORITE_COLUMNS}"
        );
        let row = self
            .client
            .query_one(
                &sql,
                &[
                    &favorite.name,
                    &favorite.birth_year,
                    &favorite.mass,
                    &favorite.height,
                    &favorite.eye_color,
                    &owner.0,
                ],
            )
            .await
            .map_err(map_pg_error)?;
        Ok(favorite_from_row(&row))
    }

    async fn delete_favorite(&self, owner: UserId, id: i64) -> Result<Option<Favorite>, StoreError> {
        let sql = format!(
            "DELETE FROM favorites WHERE id = $1 AND user_id = $2 RETURNING {FAVORITE_COLUMNS}"
        );
        let row = self
            .client
            .query_opt(&sql, &[&id, &owner.0])
            .await
            .map_err(map_pg_error)?;
        Ok(row.as_ref().map(favorite_from_row))
    }
}
