//! Catalog service
//!
//! Ties one [`CatalogSource`] to the cache-aside store and the confidence
//! aggregators. The cache holds raw upstream payloads; every read is scored
//! again, so a cached payload always reflects the current scoring policy.

use kortek_common::config::CacheConfig;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore, TtlClass};
use crate::confidence::{ConfidenceAggregator, ScoringPolicy};
use crate::source::{fetch_week, CatalogSource, FetchError};
use crate::types::{DocumentReport, HomeReport, ListReport, Scored, WeekReport, Weekday};
use crate::validators::schemas::{
    ANIME_DETAIL, EPISODE_DETAIL, LATEST_EPISODE_ITEM, MOVIE_ITEM, SCHEDULE_ITEM, SEARCH_ITEM,
};

/// Cache key conventions
pub mod keys {
    use crate::types::Weekday;

    pub const HOME: &str = "home_data";
    pub const SCHEDULE_WEEK: &str = "jadwal_rilis_all";

    pub fn anime_detail(slug: &str) -> String {
        format!("anime_detail_{}", slug)
    }

    pub fn episode_detail(url: &str) -> String {
        format!("episode_detail_{}", url)
    }

    pub fn schedule_day(day: Weekday) -> String {
        format!("jadwal_rilis_{}", day.slug())
    }

    pub fn search(query: &str) -> String {
        format!("search_{}", query)
    }

    pub fn latest(page: u32) -> String {
        format!("anime_terbaru_page_{}", page)
    }

    pub fn movies(page: u32) -> String {
        format!("movie_list_page_{}", page)
    }
}

/// Cached, scored access to one catalog source
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    cache: CacheStore<Value>,
    aggregator: ConfidenceAggregator,
    ttls: CacheConfig,
}

impl CatalogService {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        cache: CacheStore<Value>,
        policy: ScoringPolicy,
        ttls: CacheConfig,
    ) -> Self {
        Self {
            source,
            cache,
            aggregator: ConfidenceAggregator::new(policy),
            ttls,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn cache(&self) -> &CacheStore<Value> {
        &self.cache
    }

    /// Cache-aside read; `force_refresh` drops the key first
    async fn cached<F, Fut>(
        &self,
        key: &str,
        class: TtlClass,
        force_refresh: bool,
        fetcher: F,
    ) -> Result<Value, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, FetchError>>,
    {
        if force_refresh {
            debug!(key = %key, "Forced refresh");
            self.cache.invalidate(Some(key)).await;
        }
        self.cache
            .get_or_fetch(key, Some(class.resolve(&self.ttls)), fetcher)
            .await
    }

    pub async fn home(&self, force_refresh: bool) -> Result<HomeReport, FetchError> {
        let raw = self
            .cached(keys::HOME, TtlClass::Default, force_refresh, || {
                self.source.fetch_home()
            })
            .await?;
        Ok(log_outcome(keys::HOME, self.aggregator.score_home(&raw)))
    }

    pub async fn anime_detail(
        &self,
        slug: &str,
        force_refresh: bool,
    ) -> Result<DocumentReport, FetchError> {
        let key = keys::anime_detail(slug);
        let raw = self
            .cached(&key, TtlClass::Long, force_refresh, || {
                self.source.fetch_anime_detail(slug)
            })
            .await?;
        Ok(log_outcome(&key, self.aggregator.score_document(&ANIME_DETAIL, &raw)))
    }

    pub async fn episode_detail(
        &self,
        episode_url: &str,
        force_refresh: bool,
    ) -> Result<DocumentReport, FetchError> {
        let key = keys::episode_detail(episode_url);
        let raw = self
            .cached(&key, TtlClass::Long, force_refresh, || {
                self.source.fetch_episode_detail(episode_url)
            })
            .await?;
        Ok(log_outcome(&key, self.aggregator.score_document(&EPISODE_DETAIL, &raw)))
    }

    pub async fn schedule_day(
        &self,
        day: Weekday,
        force_refresh: bool,
    ) -> Result<ListReport, FetchError> {
        let key = keys::schedule_day(day);
        let raw = self
            .cached(&key, TtlClass::Long, force_refresh, || {
                self.source.fetch_schedule_day(day)
            })
            .await?;
        Ok(log_outcome(&key, self.aggregator.score_list(&SCHEDULE_ITEM, &raw)))
    }

    /// All seven days; individual day failures degrade to empty lists, a week
    /// where every day failed is an error and is not cached
    pub async fn schedule_week(&self, force_refresh: bool) -> Result<WeekReport, FetchError> {
        let source = Arc::clone(&self.source);
        let raw = self
            .cached(keys::SCHEDULE_WEEK, TtlClass::Long, force_refresh, || {
                fetch_week(source)
            })
            .await?;
        Ok(log_outcome(keys::SCHEDULE_WEEK, self.aggregator.score_week(&raw)))
    }

    pub async fn search(&self, query: &str, force_refresh: bool) -> Result<ListReport, FetchError> {
        let key = keys::search(query);
        let raw = self
            .cached(&key, TtlClass::Default, force_refresh, || {
                self.source.fetch_search(query)
            })
            .await?;
        Ok(log_outcome(&key, self.aggregator.score_list(&SEARCH_ITEM, &raw)))
    }

    pub async fn latest(&self, page: u32, force_refresh: bool) -> Result<ListReport, FetchError> {
        let key = keys::latest(page);
        let raw = self
            .cached(&key, TtlClass::Default, force_refresh, || {
                self.source.fetch_latest(page)
            })
            .await?;
        Ok(log_outcome(&key, self.aggregator.score_list(&LATEST_EPISODE_ITEM, &raw)))
    }

    pub async fn movies(&self, page: u32, force_refresh: bool) -> Result<ListReport, FetchError> {
        let key = keys::movies(page);
        let raw = self
            .cached(&key, TtlClass::Default, force_refresh, || {
                self.source.fetch_movies(page)
            })
            .await?;
        Ok(log_outcome(&key, self.aggregator.score_list(&MOVIE_ITEM, &raw)))
    }

    /// Drop one key, or the whole cache
    pub async fn invalidate(&self, key: Option<&str>) {
        self.cache.invalidate(key).await;
    }

    pub async fn cache_keys(&self) -> Vec<String> {
        self.cache.list_keys().await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

fn log_outcome<R: Scored>(key: &str, report: R) -> R {
    if report.is_rejected() {
        info!(key = %key, "Response rejected by validation");
    } else {
        debug!(key = %key, confidence_score = report.confidence_score(), "Response scored");
    }
    report
}
