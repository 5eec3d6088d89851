//! Catalog search proxy.
use axum::{
    extract::{Query, State},
    Json,
};
use metrics::counter;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::AppError;
use crate::metrics::CATALOG_SEARCH;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

/// `GET /api/characters?search=<name>`
pub async fn search_characters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    counter!(CATALOG_SEARCH).increment(1);
    let body = state.catalog.search_people(&query.search).await?;
    Ok(Json(body))
}
