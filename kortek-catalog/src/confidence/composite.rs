//! Multi-section composites: home page and full-week schedule
//!
//! Every section is validated on its own; the composite is accepted only when
//! each section keeps at least one valid item.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::aggregator::Section;
use super::{link_gate, ConfidenceAggregator, Tally};
use crate::types::{DaySchedule, HomeReport, WeekReport, Weekday};
use crate::validators::schemas::{
    LATEST_EPISODE_ITEM, MOVIE_ITEM, SCHEDULE_ITEM, TOP_RANKED_ITEM,
};
use crate::validators::RecordSchema;

/// Flat sections of the home payload, in response order
static HOME_LISTS: [(&str, &RecordSchema); 3] = [
    ("top10", &TOP_RANKED_ITEM),
    ("new_eps", &LATEST_EPISODE_ITEM),
    ("movies", &MOVIE_ITEM),
];

const HOME_SCHEDULE: &str = "jadwal_rilis";

impl ConfidenceAggregator {
    /// Score the home page composite
    ///
    /// `r` is the mean of the item ratio over the flat sections combined and the
    /// item ratio over every schedule day combined.
    pub fn score_home(&self, raw: &Value) -> HomeReport {
        let gate_passed = HOME_LISTS
            .iter()
            .all(|(name, schema)| link_gate::check_items(name, schema, raw.get(*name)))
            && link_gate::check_days(HOME_SCHEDULE, &SCHEDULE_ITEM, raw.get(HOME_SCHEDULE));
        if !gate_passed {
            return HomeReport::rejected();
        }

        let mut flat_tally = Tally::default();
        let mut lists = Vec::with_capacity(HOME_LISTS.len());
        for (name, schema) in HOME_LISTS {
            let section = Section::validate(schema, raw.get(name));
            if section.is_empty() {
                warn!(section = name, "Home section has no valid items, confidence 0.0");
                return HomeReport::rejected();
            }
            flat_tally.add(section.tally);
            lists.push(section.records);
        }

        let (schedule, schedule_tally) = validate_days(raw.get(HOME_SCHEDULE));
        let jadwal_rilis: DaySchedule = schedule
            .into_iter()
            .filter(|(_, records)| !records.is_empty())
            .collect();
        if jadwal_rilis.is_empty() {
            warn!(section = HOME_SCHEDULE, "Home section has no valid items, confidence 0.0");
            return HomeReport::rejected();
        }

        let ratio = (flat_tally.ratio() + schedule_tally.ratio()) / 2.0;
        let confidence_score = self.policy().rescale(ratio);
        debug!(
            flat_valid = flat_tally.valid,
            flat_total = flat_tally.total,
            schedule_valid = schedule_tally.valid,
            schedule_total = schedule_tally.total,
            confidence_score,
            "Home composite accepted"
        );

        let mut lists = lists.into_iter();
        HomeReport {
            confidence_score,
            top10: lists.next().unwrap_or_default(),
            new_eps: lists.next().unwrap_or_default(),
            movies: lists.next().unwrap_or_default(),
            jadwal_rilis,
        }
    }

    /// Score a full-week schedule (`{"Monday": [...], ..., "Sunday": [...]}`)
    ///
    /// Accepted when any weekday keeps a valid item; a day that failed upstream
    /// arrives as `[]` and does not reject the week. All seven days are emitted.
    pub fn score_week(&self, raw: &Value) -> WeekReport {
        if !link_gate::check_days("schedule", &SCHEDULE_ITEM, Some(raw)) {
            return WeekReport::rejected();
        }

        let mut tally = Tally::default();
        let mut days = BTreeMap::new();
        for day in Weekday::ALL {
            let section = Section::validate(&SCHEDULE_ITEM, raw.get(day.name()));
            tally.add(section.tally);
            days.insert(day, section.records);
        }

        if tally.valid == 0 {
            warn!("No weekday has a valid schedule item, confidence 0.0");
            return WeekReport::rejected();
        }

        let confidence_score = self.policy().score(tally.valid, tally.total);
        debug!(
            valid = tally.valid,
            total = tally.total,
            confidence_score,
            "Week schedule accepted"
        );

        WeekReport {
            confidence_score,
            days,
        }
    }
}

/// Validate every per-day list of a schedule object, keeping the raw day order
fn validate_days(raw: Option<&Value>) -> (DaySchedule, Tally) {
    let mut tally = Tally::default();
    let mut days = DaySchedule::new();

    if let Some(object) = raw.and_then(Value::as_object) {
        for (day, items) in object {
            let section = Section::validate(&SCHEDULE_ITEM, Some(items));
            tally.add(section.tally);
            days.push((day.clone(), section.records));
        }
    }

    (days, tally)
}
