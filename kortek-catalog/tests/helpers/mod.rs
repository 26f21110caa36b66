//! Test doubles and payload fixtures shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use kortek_catalog::cache::CacheStore;
use kortek_catalog::confidence::ScoringPolicy;
use kortek_catalog::source::{CatalogSource, FetchError};
use kortek_catalog::types::Weekday;
use kortek_catalog::CatalogService;
use kortek_common::config::CacheConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory source that counts every call
pub struct StubSource {
    payloads: Mutex<HashMap<String, Value>>,
    calls: Mutex<HashMap<String, usize>>,
    failing_days: Mutex<Vec<Weekday>>,
    fail_all: AtomicBool,
}

impl StubSource {
    /// Stub serving valid fixtures for every kind
    pub fn new() -> Self {
        let stub = Self {
            payloads: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            failing_days: Mutex::new(Vec::new()),
            fail_all: AtomicBool::new(false),
        };
        stub.set("home", home());
        stub.set("anime_detail", anime_detail("example-anime"));
        stub.set("episode_detail", episode_detail());
        stub.set("search", json!([card(1), card(2)]));
        stub.set("latest", json!([card(3)]));
        stub.set("movies", json!([card(4), card(5)]));
        for (n, day) in Weekday::ALL.iter().enumerate() {
            stub.set(&schedule_kind(*day), json!([scheduled(n)]));
        }
        stub
    }

    /// Replace the payload served for a kind
    pub fn set(&self, kind: &str, payload: Value) {
        self.payloads.lock().unwrap().insert(kind.to_string(), payload);
    }

    pub fn fail_day(&self, day: Weekday) {
        self.failing_days.lock().unwrap().push(day);
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    /// Number of fetches made for a kind
    pub fn calls(&self, kind: &str) -> usize {
        self.calls.lock().unwrap().get(kind).copied().unwrap_or(0)
    }

    fn serve(&self, kind: &str) -> Result<Value, FetchError> {
        *self.calls.lock().unwrap().entry(kind.to_string()).or_insert(0) += 1;
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(FetchError::Network(format!("stub failure for {}", kind)));
        }
        Ok(self
            .payloads
            .lock()
            .unwrap()
            .get(kind)
            .cloned()
            .unwrap_or(Value::Null))
    }
}

pub fn schedule_kind(day: Weekday) -> String {
    format!("schedule_{}", day.slug())
}

#[async_trait]
impl CatalogSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_home(&self) -> Result<Value, FetchError> {
        self.serve("home")
    }

    async fn fetch_anime_detail(&self, _slug: &str) -> Result<Value, FetchError> {
        self.serve("anime_detail")
    }

    async fn fetch_episode_detail(&self, _episode_url: &str) -> Result<Value, FetchError> {
        self.serve("episode_detail")
    }

    async fn fetch_schedule_day(&self, day: Weekday) -> Result<Value, FetchError> {
        if self.failing_days.lock().unwrap().contains(&day) {
            return Err(FetchError::Status {
                status: 500,
                url: format!("https://stub.example.com/{}", day.slug()),
            });
        }
        self.serve(&schedule_kind(day))
    }

    async fn fetch_search(&self, _query: &str) -> Result<Value, FetchError> {
        self.serve("search")
    }

    async fn fetch_latest(&self, _page: u32) -> Result<Value, FetchError> {
        self.serve("latest")
    }

    async fn fetch_movies(&self, _page: u32) -> Result<Value, FetchError> {
        self.serve("movies")
    }
}

/// Catalog over a stub with the default TTLs and scoring
pub fn catalog_with(stub: Arc<StubSource>) -> CatalogService {
    let ttls = CacheConfig::default();
    CatalogService::new(
        stub,
        CacheStore::new(ttls.ttl()),
        ScoringPolicy::default(),
        ttls,
    )
}

pub fn card(n: usize) -> Value {
    json!({
        "judul": format!("Card Title {}", n),
        "url": format!("https://example.com/anime/card-{}/", n),
        "anime_slug": format!("card-{}", n),
        "cover": format!("https://example.com/covers/card-{}.jpg", n),
    })
}

pub fn scheduled(n: usize) -> Value {
    json!({
        "title": format!("Scheduled Show {}", n),
        "url": format!("https://example.com/anime/scheduled-{}/", n),
        "anime_slug": format!("scheduled-{}", n),
        "cover_url": format!("https://example.com/covers/scheduled-{}.webp", n),
    })
}

pub fn home() -> Value {
    json!({
        "top10": [card(1), card(2)],
        "new_eps": [card(3)],
        "movies": [card(4)],
        "jadwal_rilis": {
            "Monday": [scheduled(1)],
            "Friday": [scheduled(5)],
        },
    })
}

pub fn anime_detail(slug: &str) -> Value {
    json!({
        "judul": "Example Anime",
        "url_anime": format!("https://example.com/anime/{}/", slug),
        "anime_slug": slug,
        "url_cover": format!("https://example.com/covers/{}.jpg", slug),
        "episode_list": [{
            "episode": "1",
            "title": "Episode One",
            "url": format!("https://example.com/{}-episode-1/", slug),
            "episode_slug": format!("{}-episode-1", slug),
        }],
    })
}

pub fn episode_detail() -> Value {
    json!({
        "title": "Example Anime Episode 1",
        "thumbnail_url": "https://example.com/thumbs/example-anime-1.jpg",
        "streaming_servers": [
            {"server_name": "Nakama 720p", "streaming_url": "https://video.example.com/embed/abc"},
        ],
    })
}
