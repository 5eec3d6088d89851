//! Favorites of the authenticated user. Every query is scoped to the
//! caller's id from `AuthContext`.
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use starboard_common::{Favorite, NewFavorite};
use std::sync::Arc;

use crate::error::AppError;
use crate::metrics::{FAVORITE_ADDED, FAVORITE_REMOVED};
use crate::middleware::AuthContext;
use crate::validation;
use crate::AppState;

/// `GET /api/me/favorites`
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<Json<Vec<Favorite>>, AppError> {
    let rows = state.favorites.list_favorites(auth.user_id).await?;
    Ok(Json(rows))
}

/// `POST /api/me/favorites`
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Json(favorite): Json<NewFavorite>,
) -> Result<(StatusCode, Json<Favorite>), AppError> {
    validation::validate_favorite(&favorite)?;
    let row = state
        .favorites
        .insert_favorite(auth.user_id, &favorite)
        .await?;
    counter!(FAVORITE_ADDED).increment(1);
    tracing::debug!(user_id = %auth.user_id, favorite_id = row.id, "favorite added");
    Ok((StatusCode::CREATED, Json(row)))
}

/// `DELETE /api/me/favorites/{id}`
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<Favorite>, AppError> {
    let removed = state
        .favorites
        .delete_favorite(auth.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("favorite {id}")))?;
    counter!(FAVORITE_REMOVED).increment(1);
    tracing::debug!(user_id = %auth.user_id, favorite_id = id, "favorite removed");
    Ok(Json(removed))
}
