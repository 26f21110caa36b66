//! HTTP API handlers for kortek-catalog
//!
//! Catalog routes live under `/api/v1`; `/` and `/health` sit at the root.

pub mod cache;
pub mod catalog;
pub mod health;
pub mod schedule;

pub use cache::cache_routes;
pub use catalog::catalog_routes;
pub use health::{health_routes, root_routes};
pub use schedule::schedule_routes;

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::source::FetchError;
use crate::AppState;

/// `?force_refresh=true` drops the cached entry before reading
#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub force_refresh: bool,
}

/// Record an upstream failure for the health report, then convert it
pub(crate) async fn upstream<T>(state: &AppState, result: Result<T, FetchError>) -> ApiResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            state.record_error(e.to_string()).await;
            Err(ApiError::Upstream(e))
        }
    }
}
