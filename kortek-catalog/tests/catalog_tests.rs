//! Catalog service tests: cache-aside behavior, scoring, weekly fan-out

mod helpers;

use helpers::{catalog_with, scheduled, schedule_kind, StubSource};
use kortek_catalog::source::{fetch_week, FetchError};
use kortek_catalog::types::{Scored, Weekday};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_repeated_reads_within_ttl_fetch_once() {
    let stub = Arc::new(StubSource::new());
    let catalog = catalog_with(stub.clone());

    let first = catalog.home(false).await.unwrap();
    tokio::time::advance(Duration::from_secs(2)).await;
    let second = catalog.home(false).await.unwrap();

    assert_eq!(stub.calls("home"), 1);
    assert_eq!(first, second);
    assert_eq!(first.confidence_score, 1.0);
}

#[tokio::test(start_paused = true)]
async fn test_ttl_expiry_refetches() {
    let stub = Arc::new(StubSource::new());
    let catalog = catalog_with(stub.clone());

    catalog.search("card", false).await.unwrap();
    tokio::time::advance(Duration::from_secs(601)).await;
    catalog.search("card", false).await.unwrap();
    assert_eq!(stub.calls("search"), 2);

    // details live on the long TTL
    catalog.anime_detail("example-anime", false).await.unwrap();
    tokio::time::advance(Duration::from_secs(601)).await;
    catalog.anime_detail("example-anime", false).await.unwrap();
    assert_eq!(stub.calls("anime_detail"), 1);
}

#[tokio::test]
async fn test_force_refresh_bypasses_cache() {
    let stub = Arc::new(StubSource::new());
    let catalog = catalog_with(stub.clone());

    catalog.movies(1, false).await.unwrap();
    catalog.movies(1, true).await.unwrap();
    catalog.movies(1, false).await.unwrap();
    assert_eq!(stub.calls("movies"), 2);
}

#[tokio::test]
async fn test_keys_follow_conventions() {
    let stub = Arc::new(StubSource::new());
    let catalog = catalog_with(stub);

    catalog.home(false).await.unwrap();
    catalog.anime_detail("example-anime", false).await.unwrap();
    catalog.episode_detail("https://example.com/ep-1/", false).await.unwrap();
    catalog.schedule_day(Weekday::Monday, false).await.unwrap();
    catalog.schedule_week(false).await.unwrap();
    catalog.search("naruto", false).await.unwrap();
    catalog.latest(2, false).await.unwrap();
    catalog.movies(3, false).await.unwrap();

    assert_eq!(
        catalog.cache_keys().await,
        vec![
            "anime_detail_example-anime",
            "anime_terbaru_page_2",
            "episode_detail_https://example.com/ep-1/",
            "home_data",
            "jadwal_rilis_all",
            "jadwal_rilis_monday",
            "movie_list_page_3",
            "search_naruto",
        ]
    );
}

#[tokio::test]
async fn test_fetch_error_propagates_and_is_retried() {
    let stub = Arc::new(StubSource::new());
    let catalog = catalog_with(stub.clone());

    stub.set_failing(true);
    let result = catalog.latest(1, false).await;
    assert!(matches!(result, Err(FetchError::Network(_))));
    assert!(catalog.cache_keys().await.is_empty());

    stub.set_failing(false);
    let report = catalog.latest(1, false).await.unwrap();
    assert_eq!(report.confidence_score, 1.0);
    assert_eq!(stub.calls("latest"), 2);
}

#[tokio::test]
async fn test_empty_upstream_result_is_not_cached() {
    let stub = Arc::new(StubSource::new());
    stub.set("search", json!([]));
    let catalog = catalog_with(stub.clone());

    let report = catalog.search("nothing", false).await.unwrap();
    assert!(report.is_rejected());
    assert!(report.data.is_empty());

    catalog.search("nothing", false).await.unwrap();
    assert_eq!(stub.calls("search"), 2);
}

#[tokio::test]
async fn test_clear_all_refetches_every_key() {
    let stub = Arc::new(StubSource::new());
    let catalog = catalog_with(stub.clone());

    catalog.home(false).await.unwrap();
    catalog.search("card", false).await.unwrap();
    catalog.invalidate(None).await;
    assert!(catalog.cache_keys().await.is_empty());

    catalog.home(false).await.unwrap();
    catalog.search("card", false).await.unwrap();
    assert_eq!(stub.calls("home"), 2);
    assert_eq!(stub.calls("search"), 2);
}

#[tokio::test]
async fn test_cached_payload_is_rescored_on_each_read() {
    let stub = Arc::new(StubSource::new());
    stub.set(
        "latest",
        json!([helpers::card(1), {"judul": "x", "url": "https://example.com/a/", "anime_slug": "a", "cover": "https://example.com/a.png"}]),
    );
    let catalog = catalog_with(stub.clone());

    let first = catalog.latest(1, false).await.unwrap();
    let second = catalog.latest(1, false).await.unwrap();
    assert_eq!(first.confidence_score, 0.9);
    assert_eq!(first, second);
    assert_eq!(stub.calls("latest"), 1);
}

#[tokio::test]
async fn test_fetch_week_degrades_failed_day() {
    let stub = Arc::new(StubSource::new());
    stub.fail_day(Weekday::Wednesday);

    let week = fetch_week(stub.clone()).await.unwrap();
    let days = week.as_object().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days["Wednesday"], json!([]));
    assert_eq!(days["Monday"], json!([scheduled(0)]));
    for day in Weekday::ALL {
        if day != Weekday::Wednesday {
            assert_eq!(stub.calls(&schedule_kind(day)), 1);
        }
    }
}

#[tokio::test]
async fn test_week_with_every_day_failed_is_error_and_not_cached() {
    let stub = Arc::new(StubSource::new());
    for day in Weekday::ALL {
        stub.fail_day(day);
    }
    let catalog = catalog_with(stub.clone());

    let result = catalog.schedule_week(false).await;
    assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
    assert!(catalog.cache_keys().await.is_empty());
}

#[tokio::test]
async fn test_week_with_only_empty_days_is_cached() {
    let stub = Arc::new(StubSource::new());
    for day in Weekday::ALL {
        stub.set(&schedule_kind(day), json!([]));
    }
    let catalog = catalog_with(stub.clone());

    let report = catalog.schedule_week(false).await.unwrap();
    assert!(report.is_rejected());
    assert_eq!(report.days.len(), 7);
    assert_eq!(catalog.cache_keys().await, vec!["jadwal_rilis_all"]);
}

#[tokio::test]
async fn test_schedule_week_scores_surviving_days() {
    let stub = Arc::new(StubSource::new());
    stub.fail_day(Weekday::Saturday);
    let catalog = catalog_with(stub);

    let report = catalog.schedule_week(false).await.unwrap();
    assert_eq!(report.confidence_score, 1.0);
    assert_eq!(report.days.len(), 7);
    assert!(report.days[&Weekday::Saturday].is_empty());
    assert_eq!(report.days[&Weekday::Sunday].len(), 1);
}

#[tokio::test]
async fn test_schedule_day_bad_link_rejects() {
    let stub = Arc::new(StubSource::new());
    let mut bad = scheduled(2);
    bad["url"] = json!("ftp://bad");
    stub.set(
        &schedule_kind(Weekday::Tuesday),
        json!([scheduled(1), bad, scheduled(3)]),
    );
    let catalog = catalog_with(stub);

    let report = catalog.schedule_day(Weekday::Tuesday, false).await.unwrap();
    assert_eq!(report.confidence_score, 0.0);
    assert!(report.data.is_empty());
}

#[tokio::test]
async fn test_rejected_document_has_no_fields() {
    let stub = Arc::new(StubSource::new());
    let mut detail = helpers::anime_detail("example-anime");
    detail["episode_list"] = json!([]);
    stub.set("anime_detail", detail);
    let catalog = catalog_with(stub);

    let report = catalog.anime_detail("example-anime", false).await.unwrap();
    assert!(report.is_rejected());
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({"confidence_score": 0.0})
    );
}

#[tokio::test]
async fn test_stats_cover_cached_keys() {
    let stub = Arc::new(StubSource::new());
    let catalog = catalog_with(stub);

    catalog.home(false).await.unwrap();
    let stats = catalog.cache_stats().await;
    assert_eq!(stats.total_keys, 1);
    assert_eq!(stats.keys[0].key, "home_data");
    assert!(stats.keys[0].size > 0);
}
