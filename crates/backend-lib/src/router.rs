// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router.
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::error::AppError;
use crate::handlers::{auth, characters, favorites};
use crate::middleware::require_auth;
use crate::AppState;

/// Create the application router.
///
/// The whole `/api/me` prefix sits behind the bearer-token middleware,
/// unmatched paths under it included; anything else no API route
/// matches is served from the static directory.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route("/favorites/{id}", delete(favorites::remove_favorite))
        .fallback(unknown_route)
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let static_files = ServeDir::new(&state.settings.static_dir);

    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/signin", post(auth::signin))
        .route("/api/characters", get(characters::search_characters))
        .nest("/api/me", protected)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn unknown_route() -> AppError {
    AppError::NotFound("route".to_string())
}
