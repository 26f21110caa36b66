//! Release schedule endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::{upstream, RefreshQuery};
use crate::error::{ApiError, ApiResult};
use crate::types::{ListReport, WeekReport, Weekday};
use crate::AppState;

/// GET /api/v1/jadwal-rilis
///
/// All seven days, fetched concurrently.
pub async fn schedule_week(
    State(state): State<AppState>,
    Query(params): Query<RefreshQuery>,
) -> ApiResult<Json<WeekReport>> {
    let catalog = state.catalog()?;
    let report = upstream(&state, catalog.schedule_week(params.force_refresh).await).await?;
    Ok(Json(report))
}

/// GET /api/v1/jadwal-rilis/:day
pub async fn schedule_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
    Query(params): Query<RefreshQuery>,
) -> ApiResult<Json<ListReport>> {
    let day: Weekday = day
        .parse()
        .map_err(|e: crate::types::UnknownWeekday| ApiError::BadRequest(e.to_string()))?;

    let catalog = state.catalog()?;
    let report = upstream(&state, catalog.schedule_day(day, params.force_refresh).await).await?;
    Ok(Json(report))
}

/// Build schedule routes (mounted under `/api/v1`)
pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/jadwal-rilis", get(schedule_week))
        .route("/jadwal-rilis/:day", get(schedule_day))
}
