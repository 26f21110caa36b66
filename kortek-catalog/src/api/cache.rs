//! Cache administration endpoints
//!
//! - `GET /api/v1/cache/keys`
//! - `GET /api/v1/cache/stats`
//! - `DELETE /api/v1/cache?key=` (no key clears everything)

use axum::{
    extract::{Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CacheKeysResponse {
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct InvalidateQuery {
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub status: String,
    /// Invalidated key, absent when the whole cache was cleared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// GET /api/v1/cache/keys
pub async fn list_keys(State(state): State<AppState>) -> ApiResult<Json<CacheKeysResponse>> {
    let catalog = state.catalog()?;
    Ok(Json(CacheKeysResponse {
        keys: catalog.cache_keys().await,
    }))
}

/// GET /api/v1/cache/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<CacheStats>> {
    let catalog = state.catalog()?;
    Ok(Json(catalog.cache_stats().await))
}

/// DELETE /api/v1/cache
pub async fn invalidate(
    State(state): State<AppState>,
    Query(params): Query<InvalidateQuery>,
) -> ApiResult<Json<InvalidateResponse>> {
    let catalog = state.catalog()?;
    let key = params.key.filter(|k| !k.is_empty());
    catalog.invalidate(key.as_deref()).await;

    let status = if key.is_some() { "invalidated" } else { "cleared" };
    Ok(Json(InvalidateResponse {
        status: status.to_string(),
        key,
    }))
}

/// Build cache admin routes (mounted under `/api/v1`)
pub fn cache_routes() -> Router<AppState> {
    Router::new()
        .route("/cache", delete(invalidate))
        .route("/cache/keys", get(list_keys))
        .route("/cache/stats", get(stats))
}
