//! Catalog sources
//!
//! A source produces raw (unvalidated) JSON records for each catalog entity
//! kind. The cache and the confidence layer only ever see [`CatalogSource`],
//! never a concrete upstream.

pub mod http;
pub mod schedule;

pub use http::HttpCatalogSource;
pub use schedule::fetch_week;

use kortek_common::config::SourceConfig;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::types::Weekday;

/// Raw fetch failure; propagated to the caller and never cached
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Source cannot serve this request
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Capability interface implemented per upstream site
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Source name, used in logs and the health report
    fn name(&self) -> &str;

    /// Home page composite: `{top10, new_eps, movies, jadwal_rilis}`
    async fn fetch_home(&self) -> Result<Value, FetchError>;

    async fn fetch_anime_detail(&self, slug: &str) -> Result<Value, FetchError>;

    async fn fetch_episode_detail(&self, episode_url: &str) -> Result<Value, FetchError>;

    /// Schedule list for one weekday
    async fn fetch_schedule_day(&self, day: Weekday) -> Result<Value, FetchError>;

    async fn fetch_search(&self, query: &str) -> Result<Value, FetchError>;

    /// Latest released episodes, 1-based page
    async fn fetch_latest(&self, page: u32) -> Result<Value, FetchError>;

    /// Movie list, 1-based page
    async fn fetch_movies(&self, page: u32) -> Result<Value, FetchError>;
}

/// Build the configured source, or `None` when it is switched off
pub fn build_source(config: &SourceConfig) -> Result<Option<Arc<dyn CatalogSource>>, FetchError> {
    if !config.active {
        info!(source = %config.name, "Catalog source inactive");
        return Ok(None);
    }

    let source = HttpCatalogSource::new(config)?;
    info!(source = %config.name, base_url = %config.base_url, "Catalog source ready");
    Ok(Some(Arc::new(source)))
}
