//! kortek-catalog library interface
//!
//! Exposes the validation, confidence, cache and source layers plus the HTTP
//! router, so integration tests can drive them directly.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod confidence;
pub mod error;
pub mod source;
pub mod types;
pub mod validators;

pub use crate::catalog::CatalogService;
pub use crate::error::{ApiError, ApiResult};

use axum::http::{HeaderValue, Method};
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog behind the cache; `None` when no source is active
    pub catalog: Option<CatalogService>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last upstream failure, reported by /health
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(catalog: Option<CatalogService>) -> Self {
        Self {
            catalog,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Active catalog, or 503 when no source is configured
    pub fn catalog(&self) -> ApiResult<&CatalogService> {
        self.catalog
            .as_ref()
            .ok_or_else(|| ApiError::ServiceUnavailable("No active scraper available".to_string()))
    }

    pub async fn record_error(&self, message: String) {
        warn!(error = %message, "Upstream fetch failed");
        *self.last_error.write().await = Some(message);
    }
}

/// Build application router
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .merge(api::catalog_routes())
        .merge(api::schedule_routes())
        .merge(api::cache_routes());

    let router = Router::new()
        .merge(api::root_routes())
        .merge(api::health_routes())
        .nest("/api/v1", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// CORS layer for the configured origins; `"*"` allows any origin
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any),
    )
}
