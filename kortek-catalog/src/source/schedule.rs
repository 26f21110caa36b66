//! Full-week schedule fan-out
//!
//! One task per weekday on a `JoinSet`, joined before returning. A day whose
//! fetch fails (or whose task panics) degrades to an empty list; the other
//! days are unaffected. When no day succeeds the whole fetch fails, so an
//! unreachable upstream is never cached as an empty week.

use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use super::{CatalogSource, FetchError};
use crate::types::Weekday;

/// Fetch all seven schedule days concurrently
///
/// Returns `{"Monday": [...], ..., "Sunday": [...]}` with every day present,
/// or the last day's error when all seven fetches failed.
pub async fn fetch_week(source: Arc<dyn CatalogSource>) -> Result<Value, FetchError> {
    let mut tasks = JoinSet::new();
    for day in Weekday::ALL {
        let source = Arc::clone(&source);
        tasks.spawn(async move { (day, source.fetch_schedule_day(day).await) });
    }

    let mut week: Map<String, Value> = Weekday::ALL
        .iter()
        .map(|day| (day.name().to_string(), Value::Array(Vec::new())))
        .collect();
    let mut succeeded = 0;
    let mut last_error = None;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((day, Ok(items))) => {
                debug!(day = %day, "Schedule day joined");
                week.insert(day.name().to_string(), items);
                succeeded += 1;
            }
            Ok((day, Err(e))) => {
                warn!(day = %day, error = %e, "Schedule day failed, using empty list");
                last_error = Some(e);
            }
            Err(e) => {
                error!(error = %e, "Schedule task panicked, its day stays empty");
                last_error = Some(FetchError::Unavailable(format!("schedule task failed: {}", e)));
            }
        }
    }

    if succeeded == 0 {
        error!("Every schedule day failed");
        return Err(last_error
            .unwrap_or_else(|| FetchError::Unavailable("no schedule day fetched".to_string())));
    }

    Ok(Value::Object(week))
}
