//! Catalog endpoints
//!
//! - `GET /api/v1/home`
//! - `GET /api/v1/anime-detail?anime_slug=`
//! - `GET /api/v1/episode-detail?episode_url=`
//! - `GET /api/v1/search?query=`
//! - `GET /api/v1/anime-terbaru?page=`
//! - `GET /api/v1/movie?page=`
//!
//! A rejected home page or document (confidence 0.0) is answered with 404.
//! List envelopes are returned as scored, including a zero score.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::{upstream, RefreshQuery};
use crate::error::{ApiError, ApiResult};
use crate::types::{DocumentReport, HomeReport, ListReport, Scored};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnimeDetailQuery {
    #[serde(default)]
    pub anime_slug: String,
    #[serde(default)]
    pub force_refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeDetailQuery {
    #[serde(default)]
    pub episode_url: String,
    #[serde(default)]
    pub force_refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub force_refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub force_refresh: bool,
}

fn first_page() -> u32 {
    1
}

impl PageQuery {
    fn checked_page(&self) -> ApiResult<u32> {
        if self.page == 0 {
            return Err(ApiError::BadRequest("page must be 1 or greater".to_string()));
        }
        Ok(self.page)
    }
}

/// GET /api/v1/home
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<RefreshQuery>,
) -> ApiResult<Json<HomeReport>> {
    let catalog = state.catalog()?;
    let report = upstream(&state, catalog.home(params.force_refresh).await).await?;
    if report.is_rejected() {
        return Err(ApiError::NotFound(
            "Home page data not found or source unavailable".to_string(),
        ));
    }
    Ok(Json(report))
}

/// GET /api/v1/anime-detail
pub async fn anime_detail(
    State(state): State<AppState>,
    Query(params): Query<AnimeDetailQuery>,
) -> ApiResult<Json<DocumentReport>> {
    let slug = params.anime_slug.trim();
    if slug.is_empty() {
        return Err(ApiError::BadRequest("anime_slug cannot be empty".to_string()));
    }

    let catalog = state.catalog()?;
    let report = upstream(&state, catalog.anime_detail(slug, params.force_refresh).await).await?;
    if report.is_rejected() {
        return Err(ApiError::NotFound(format!(
            "Anime with slug '{}' not found",
            slug
        )));
    }
    Ok(Json(report))
}

/// GET /api/v1/episode-detail
pub async fn episode_detail(
    State(state): State<AppState>,
    Query(params): Query<EpisodeDetailQuery>,
) -> ApiResult<Json<DocumentReport>> {
    let episode_url = params.episode_url.trim();
    if episode_url.is_empty() {
        return Err(ApiError::BadRequest("episode_url cannot be empty".to_string()));
    }

    let catalog = state.catalog()?;
    let report = upstream(
        &state,
        catalog.episode_detail(episode_url, params.force_refresh).await,
    )
    .await?;
    if report.is_rejected() {
        return Err(ApiError::NotFound(format!(
            "Episode '{}' not found",
            episode_url
        )));
    }
    Ok(Json(report))
}

/// GET /api/v1/search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<ListReport>> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest(
            "Query parameter cannot be empty".to_string(),
        ));
    }

    let catalog = state.catalog()?;
    let report = upstream(&state, catalog.search(query, params.force_refresh).await).await?;
    Ok(Json(report))
}

/// GET /api/v1/anime-terbaru
pub async fn latest(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Json<ListReport>> {
    let page = params.checked_page()?;
    let catalog = state.catalog()?;
    let report = upstream(&state, catalog.latest(page, params.force_refresh).await).await?;
    Ok(Json(report))
}

/// GET /api/v1/movie
pub async fn movies(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Json<ListReport>> {
    let page = params.checked_page()?;
    let catalog = state.catalog()?;
    let report = upstream(&state, catalog.movies(page, params.force_refresh).await).await?;
    Ok(Json(report))
}

/// Build catalog routes (mounted under `/api/v1`)
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route("/anime-detail", get(anime_detail))
        .route("/episode-detail", get(episode_detail))
        .route("/search", get(search))
        .route("/anime-terbaru", get(latest))
        .route("/movie", get(movies))
}
