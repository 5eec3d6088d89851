// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Sign-up and sign-in handlers.
use axum::{extract::State, http::StatusCode, Json};
use starboard_common::{AuthResponse, Credentials};
use std::sync::Arc;

use crate::error::AppError;
use crate::validation;
use crate::AppState;

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validation::validate_credentials(&credentials)?;
    let response = state.auth.register(credentials).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /api/auth/signin`
pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = state.auth.login(credentials).await?;
    Ok(Json(response))
}
