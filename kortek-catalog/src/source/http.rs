//! HTTP catalog source
//!
//! Release schedules come from the upstream's JSON schedule API and are mapped
//! into schedule records here. Every other entity kind is requested as raw JSON
//! records from the extraction endpoints under `base_url`.
//!
//! # Endpoints
//! - `{api_url}/all-schedule?perpage=100&day=<day>`
//! - `{base_url}/home`
//! - `{base_url}/anime/<slug>`
//! - `{base_url}/episode?url=<episode url>`
//! - `{search_url}/search?s=<query>`
//! - `{base_url}/anime-terbaru?page=<n>`
//! - `{base_url}/movies?page=<n>`

use async_trait::async_trait;
use kortek_common::config::SourceConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{CatalogSource, FetchError};
use crate::types::Weekday;
use crate::validators::record::UNKNOWN;

/// Page size requested from the schedule API
const SCHEDULE_PAGE_SIZE: u32 = 100;

static ANIME_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"anime/([^/]+)").expect("anime slug pattern is valid"));

/// One entry of the upstream schedule API
#[derive(Debug, Deserialize)]
struct ScheduleApiItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    featured_img_src: Option<String>,
    #[serde(default)]
    east_type: Option<String>,
    #[serde(default)]
    east_score: Option<Value>,
    /// Comma-separated genre names
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    east_time: Option<String>,
}

impl ScheduleApiItem {
    /// Map into the schedule record layout; gaps become `"N/A"` for the validators to judge
    fn into_record(self) -> Value {
        let url = self.url.unwrap_or_else(|| UNKNOWN.to_string());
        let genres: Vec<String> = self
            .genre
            .filter(|raw| !raw.is_empty() && raw != UNKNOWN)
            .map(|raw| raw.split(',').map(|g| g.trim().to_string()).collect())
            .unwrap_or_default();

        json!({
            "title": self.title.unwrap_or_else(|| UNKNOWN.to_string()),
            "anime_slug": anime_slug_from_url(&url),
            "url": url,
            "cover_url": self.featured_img_src.unwrap_or_else(|| UNKNOWN.to_string()),
            "type": self.east_type.unwrap_or_else(|| UNKNOWN.to_string()),
            "score": self.east_score.unwrap_or_else(|| Value::from(UNKNOWN)),
            "genres": genres,
            "release_time": self.east_time.unwrap_or_else(|| UNKNOWN.to_string()),
        })
    }
}

/// Slug segment following `anime/` in an anime page URL
pub fn anime_slug_from_url(url: &str) -> Option<String> {
    if url == UNKNOWN {
        return None;
    }
    ANIME_SLUG
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Upstream site reached over HTTP
pub struct HttpCatalogSource {
    name: String,
    base_url: String,
    search_url: String,
    api_url: String,
    http_client: Client,
}

impl HttpCatalogSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        let user_agent = header::HeaderValue::from_str(&config.user_agent)
            .map_err(|e| FetchError::Unavailable(format!("Invalid User-Agent: {}", e)))?;
        headers.insert(header::USER_AGENT, user_agent);

        let http_client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: config.name.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_url: config.search_url.trim_end_matches('/').to_string(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// GET a JSON document
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        debug!(source = %self.name, url = %url, "Fetching upstream");

        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                debug!(url = %url, "Upstream resource not found");
            } else {
                warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            }
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Parse(format!("Invalid JSON from {}: {}", url, e)))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_home(&self) -> Result<Value, FetchError> {
        let url = format!("{}/home", self.base_url);
        self.get_json(&url, &[]).await
    }

    async fn fetch_anime_detail(&self, slug: &str) -> Result<Value, FetchError> {
        let url = format!("{}/anime/{}", self.base_url, slug);
        self.get_json(&url, &[]).await
    }

    async fn fetch_episode_detail(&self, episode_url: &str) -> Result<Value, FetchError> {
        let url = format!("{}/episode", self.base_url);
        self.get_json(&url, &[("url", episode_url.to_string())]).await
    }

    async fn fetch_schedule_day(&self, day: Weekday) -> Result<Value, FetchError> {
        let url = format!("{}/all-schedule", self.api_url);
        let query = [
            ("perpage", SCHEDULE_PAGE_SIZE.to_string()),
            ("day", day.slug().to_string()),
        ];
        let raw = self.get_json(&url, &query).await?;

        let items: Vec<ScheduleApiItem> = serde_json::from_value(raw)
            .map_err(|e| FetchError::Parse(format!("Unexpected schedule payload for {}: {}", day, e)))?;

        debug!(day = %day, count = items.len(), "Schedule day fetched");
        Ok(Value::Array(
            items.into_iter().map(ScheduleApiItem::into_record).collect(),
        ))
    }

    async fn fetch_search(&self, query: &str) -> Result<Value, FetchError> {
        let url = format!("{}/search", self.search_url);
        self.get_json(&url, &[("s", query.to_string())]).await
    }

    async fn fetch_latest(&self, page: u32) -> Result<Value, FetchError> {
        let url = format!("{}/anime-terbaru", self.base_url);
        self.get_json(&url, &[("page", page.to_string())]).await
    }

    async fn fetch_movies(&self, page: u32) -> Result<Value, FetchError> {
        let url = format!("{}/movies", self.base_url);
        self.get_json(&url, &[("page", page.to_string())]).await
    }
}
