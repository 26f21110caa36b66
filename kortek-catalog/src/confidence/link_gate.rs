//! Link integrity gate
//!
//! Before any item is scored, every URL and image URL of every item must pass
//! its field validator. One malformed link anywhere means the upstream markup
//! shifted, so the whole response is rejected.

use serde_json::Value;
use tracing::warn;

use crate::validators::RecordSchema;

/// Check the link fields of every item in a raw list
///
/// A missing or non-list value has no links to check and passes; item scoring
/// rejects it later.
pub fn check_items(section: &str, schema: &RecordSchema, raw: Option<&Value>) -> bool {
    let Some(items) = raw.and_then(Value::as_array) else {
        return true;
    };

    for (index, item) in items.iter().enumerate() {
        for field in schema.link_fields() {
            let value = item.get(field.name);
            if !field.rule.check(value) {
                warn!(
                    section = %section,
                    index,
                    field = field.name,
                    value = %value.map(|v| v.to_string()).unwrap_or_default(),
                    "Link gate: malformed link, rejecting response"
                );
                return false;
            }
        }
    }
    true
}

/// Check every per-day list of a schedule map (`{"Monday": [...], ...}`)
pub fn check_days(section: &str, schema: &RecordSchema, raw: Option<&Value>) -> bool {
    let Some(days) = raw.and_then(Value::as_object) else {
        return true;
    };

    days.iter().all(|(day, items)| {
        let label = format!("{}.{}", section, day);
        check_items(&label, schema, Some(items))
    })
}
