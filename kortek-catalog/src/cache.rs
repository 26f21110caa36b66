//! Cache-aside store
//!
//! Process-wide TTL cache in front of the upstream fetchers. On a fresh hit the
//! stored payload is returned without calling the fetcher; on a miss or a stale
//! entry the fetcher runs and its result is stored when non-empty.
//!
//! **Concurrency:** the map sits behind a `tokio::sync::RwLock`; the lock is
//! never held while a fetcher runs. Concurrent misses on the same key each run
//! their fetcher and the last write wins.
//!
//! **Errors:** a fetcher error propagates to the caller and is never stored.

use kortek_common::config::CacheConfig;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

/// Payloads the store can hold
pub trait CachePayload: Clone + Send + Sync + 'static {
    /// Empty payloads are returned to the caller but not stored
    fn is_empty_payload(&self) -> bool;

    /// Rough size in bytes, reported by [`CacheStore::stats`]
    fn approximate_size(&self) -> usize;
}

impl CachePayload for Value {
    fn is_empty_payload(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    fn approximate_size(&self) -> usize {
        serde_json::to_vec(self).map(|bytes| bytes.len()).unwrap_or(0)
    }
}

/// TTL class of a cached resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlClass {
    /// Volatile lists (home, search, latest, movies)
    Default,
    /// Detail documents and schedules
    Long,
}

impl TtlClass {
    pub fn resolve(self, config: &CacheConfig) -> Duration {
        match self {
            TtlClass::Default => config.ttl(),
            TtlClass::Long => config.long_ttl(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    payload: T,
    stored_at: Instant,
}

/// Per-key introspection row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheKeyStats {
    pub key: String,
    pub age_secs: u64,
    pub size: usize,
}

/// Snapshot returned by [`CacheStore::stats`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub total_keys: usize,
    pub keys: Vec<CacheKeyStats>,
}

/// Shared TTL store; cloning yields another handle to the same map
#[derive(Debug, Clone)]
pub struct CacheStore<T> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
    default_ttl: Duration,
}

impl<T: CachePayload> CacheStore<T> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    /// Return the fresh cached payload for `key`, or run `fetcher` and cache its result
    ///
    /// An entry is fresh while `now - stored_at < ttl`; `None` uses the store default.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fetcher: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let ttl = ttl.unwrap_or(self.default_ttl);

        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(key) {
                let age = entry.stored_at.elapsed();
                if age < ttl {
                    debug!(key = %key, age_secs = age.as_secs(), "Cache hit");
                    return Ok(entry.payload.clone());
                }
                debug!(key = %key, age_secs = age.as_secs(), "Cache entry stale");
            }
        }

        debug!(key = %key, "Cache miss, fetching");
        let payload = fetcher().await?;

        if payload.is_empty_payload() {
            debug!(key = %key, "Fetched payload is empty, not caching");
            return Ok(payload);
        }

        self.entries.write().await.insert(
            key.to_string(),
            CacheEntry {
                payload: payload.clone(),
                stored_at: Instant::now(),
            },
        );
        debug!(key = %key, ttl_secs = ttl.as_secs(), "Cached payload");

        Ok(payload)
    }

    /// Remove one key, or every key when `key` is `None`
    pub async fn invalidate(&self, key: Option<&str>) {
        let mut entries = self.entries.write().await;
        match key {
            Some(key) => {
                if entries.remove(key).is_some() {
                    info!(key = %key, "Cache entry invalidated");
                }
            }
            None => {
                let count = entries.len();
                entries.clear();
                info!(count, "Cache cleared");
            }
        }
    }

    /// Stored keys, sorted
    pub async fn list_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let mut keys: Vec<CacheKeyStats> = entries
            .iter()
            .map(|(key, entry)| CacheKeyStats {
                key: key.clone(),
                age_secs: entry.stored_at.elapsed().as_secs(),
                size: entry.payload.approximate_size(),
            })
            .collect();
        keys.sort_by(|a, b| a.key.cmp(&b.key));

        CacheStats {
            total_keys: keys.len(),
            keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store() -> CacheStore<Value> {
        CacheStore::new(Duration::from_secs(5))
    }

    async fn counted(
        store: &CacheStore<Value>,
        key: &str,
        calls: &AtomicUsize,
        payload: Value,
    ) -> Value {
        store
            .get_or_fetch(key, None, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(payload)
            })
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_skips_fetcher() {
        let store = store();
        let calls = AtomicUsize::new(0);

        let first = counted(&store, "home", &calls, json!({"a": 1})).await;
        tokio::time::advance(Duration::from_secs(2)).await;
        let second = counted(&store, "home", &calls, json!({"a": 2})).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_refetches() {
        let store = store();
        let calls = AtomicUsize::new(0);

        counted(&store, "home", &calls, json!({"a": 1})).await;
        tokio::time::advance(Duration::from_secs(5)).await;
        let refreshed = counted(&store, "home", &calls, json!({"a": 2})).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed, json!({"a": 2}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_ttl_overrides_default() {
        let store = store();
        store
            .get_or_fetch("detail", Some(Duration::from_secs(60)), || async {
                Ok::<_, String>(json!([1]))
            })
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        let result = store
            .get_or_fetch("detail", Some(Duration::from_secs(60)), || async {
                Err::<Value, _>("fetcher must not run".to_string())
            })
            .await;
        assert_eq!(result, Ok(json!([1])));
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_and_is_not_cached() {
        let store = store();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result = store
            .get_or_fetch("search_x", None, || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<Value, _>("upstream down")
            })
            .await;
        assert_eq!(result, Err("upstream down"));
        assert!(store.list_keys().await.is_empty());

        counted(&store, "search_x", &calls, json!(["hit"])).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_payload_returned_but_not_stored() {
        let store = store();
        let calls = AtomicUsize::new(0);

        for empty in [json!(null), json!([]), json!({}), json!("")] {
            let result = counted(&store, "movies", &calls, empty.clone()).await;
            assert_eq!(result, empty);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(store.list_keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_single_key() {
        let store = store();
        let calls = AtomicUsize::new(0);

        counted(&store, "a", &calls, json!([1])).await;
        counted(&store, "b", &calls, json!([2])).await;
        store.invalidate(Some("a")).await;

        assert_eq!(store.list_keys().await, vec!["b".to_string()]);
        counted(&store, "a", &calls, json!([1])).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_clear_all_forces_every_fetcher_again() {
        let store = store();
        let calls = AtomicUsize::new(0);

        for key in ["home_data", "search_one", "movie_list_page_1"] {
            counted(&store, key, &calls, json!([key])).await;
        }
        store.invalidate(None).await;
        assert!(store.list_keys().await.is_empty());

        for key in ["home_data", "search_one", "movie_list_page_1"] {
            counted(&store, key, &calls, json!([key])).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_report_age_and_size() {
        let store = store();
        let calls = AtomicUsize::new(0);

        counted(&store, "b", &calls, json!([1, 2])).await;
        tokio::time::advance(Duration::from_secs(3)).await;
        counted(&store, "a", &calls, json!({"k": "v"})).await;

        let stats = store.stats().await;
        assert_eq!(stats.total_keys, 2);
        assert_eq!(
            stats.keys,
            vec![
                CacheKeyStats { key: "a".into(), age_secs: 0, size: 9 },
                CacheKeyStats { key: "b".into(), age_secs: 3, size: 5 },
            ]
        );
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = store();
        let other = store.clone();
        let calls = AtomicUsize::new(0);

        counted(&store, "shared", &calls, json!([1])).await;
        counted(&other, "shared", &calls, json!([1])).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ttl_class_resolution() {
        let config = CacheConfig::default();
        assert_eq!(TtlClass::Default.resolve(&config), Duration::from_secs(600));
        assert_eq!(TtlClass::Long.resolve(&config), Duration::from_secs(3600));
    }
}
