//! Record Validators
//!
//! One generic engine driven by static [`RecordSchema`] values. A schema lists
//! the required fields (each with a [`FieldRule`]), the optional fields with
//! their canonical defaults, and any nested collections.
//!
//! # Contract
//! - Any required field failing its rule rejects the record; nothing is emitted.
//! - A required nested collection with zero surviving items rejects the record.
//! - Accepted records are normalized copies: required values verbatim, optional
//!   fields defaulted when absent or empty. The raw input is never mutated.
//! - Normalization is idempotent.
//! - Malformed input (non-object, wrong value types) is a rejection, never a panic.

use serde_json::{Map, Value};
use tracing::debug;

use super::fields::{validate_image_url, validate_slug, validate_title, validate_url};

/// Normalized record emitted by the engine
pub type Record = Map<String, Value>;

/// Canonical "unknown" placeholder
pub const UNKNOWN: &str = "N/A";

/// Rule applied to a required field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Title,
    Url,
    ImageUrl,
    Slug,
    /// Any non-empty value
    NonEmpty,
}

impl FieldRule {
    pub fn check(self, value: Option<&Value>) -> bool {
        match self {
            FieldRule::NonEmpty => value.map_or(false, |v| !is_empty_value(v)),
            FieldRule::Title => value.and_then(Value::as_str).map_or(false, validate_title),
            FieldRule::Url => value.and_then(Value::as_str).map_or(false, validate_url),
            FieldRule::ImageUrl => value.and_then(Value::as_str).map_or(false, validate_image_url),
            FieldRule::Slug => value.and_then(Value::as_str).map_or(false, validate_slug),
        }
    }

    /// Rules checked by the link-integrity gate
    pub fn is_link(self) -> bool {
        matches!(self, FieldRule::Url | FieldRule::ImageUrl)
    }
}

/// A field that must be present and pass its rule
#[derive(Debug, Clone, Copy)]
pub struct RequiredField {
    pub name: &'static str,
    pub rule: FieldRule,
    /// Nested path tried when the top-level value fails
    pub fallback: Option<&'static [&'static str]>,
}

impl RequiredField {
    pub const fn new(name: &'static str, rule: FieldRule) -> Self {
        Self {
            name,
            rule,
            fallback: None,
        }
    }

    pub const fn with_fallback(mut self, path: &'static [&'static str]) -> Self {
        self.fallback = Some(path);
        self
    }

    /// Resolve the value that satisfies the rule, trying the fallback path second
    fn resolve<'a>(&self, raw: &'a Map<String, Value>) -> Option<&'a Value> {
        let primary = raw.get(self.name);
        if self.rule.check(primary) {
            return primary;
        }

        let path = self.fallback?;
        let (first, rest) = path.split_first()?;
        let mut current = raw.get(*first)?;
        for segment in rest {
            current = current.get(*segment)?;
        }
        self.rule.check(Some(current)).then_some(current)
    }
}

/// Canonical default for an optional field
#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    /// `"N/A"`
    Unknown,
    Text(&'static str),
    TextList(&'static [&'static str]),
    EmptyList,
    EmptyObject,
    /// Object with fixed keys; `None` becomes JSON null
    Object(&'static [(&'static str, Option<&'static str>)]),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Unknown => Value::from(UNKNOWN),
            DefaultValue::Text(text) => Value::from(text),
            DefaultValue::TextList(items) => {
                Value::Array(items.iter().map(|s| Value::from(*s)).collect())
            }
            DefaultValue::EmptyList => Value::Array(Vec::new()),
            DefaultValue::EmptyObject => Value::Object(Map::new()),
            DefaultValue::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| {
                        let value = value.map_or(Value::Null, Value::from);
                        (key.to_string(), value)
                    })
                    .collect(),
            ),
        }
    }
}

/// An optional field and its default
#[derive(Debug, Clone, Copy)]
pub struct OptionalField {
    pub name: &'static str,
    pub default: DefaultValue,
}

impl OptionalField {
    pub const fn new(name: &'static str, default: DefaultValue) -> Self {
        Self { name, default }
    }
}

/// A nested list of records validated with its own schema
#[derive(Debug, Clone, Copy)]
pub struct CollectionField {
    pub name: &'static str,
    pub item: &'static RecordSchema,
    /// Required collections must keep at least one item
    pub required: bool,
}

/// Schema descriptor for one entity kind
#[derive(Debug)]
pub struct RecordSchema {
    /// Entity kind, used in diagnostics
    pub kind: &'static str,
    pub required: &'static [RequiredField],
    pub optional: &'static [OptionalField],
    pub collections: &'static [CollectionField],
    /// Copy unrecognized fields through (flat list items) or drop them (documents)
    pub retain_unknown: bool,
}

/// Outcome of validating one raw record
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub accepted: bool,
    /// Normalized record; empty when rejected
    pub record: Record,
}

impl Validation {
    fn rejected() -> Self {
        Self {
            accepted: false,
            record: Record::new(),
        }
    }

    pub fn into_record(self) -> Option<Record> {
        self.accepted.then_some(self.record)
    }
}

impl RecordSchema {
    /// Required fields inspected by the link-integrity gate
    pub fn link_fields(&self) -> impl Iterator<Item = &RequiredField> + '_ {
        self.required.iter().filter(|field| field.rule.is_link())
    }

    /// Validate and normalize one raw record
    pub fn validate(&self, raw: &Value) -> Validation {
        let Some(object) = raw.as_object() else {
            debug!(kind = self.kind, "Record rejected: not an object");
            return Validation::rejected();
        };

        let mut resolved = Vec::with_capacity(self.required.len());
        for field in self.required {
            match field.resolve(object) {
                Some(value) => resolved.push((field.name, value.clone())),
                None => {
                    debug!(
                        kind = self.kind,
                        field = field.name,
                        rule = ?field.rule,
                        "Record rejected: required field failed validation"
                    );
                    return Validation::rejected();
                }
            }
        }

        let mut collections = Vec::with_capacity(self.collections.len());
        for collection in self.collections {
            let items = validate_items(collection.item, object.get(collection.name));
            if items.is_empty() {
                if collection.required {
                    debug!(
                        kind = self.kind,
                        collection = collection.name,
                        "Record rejected: no valid items in required collection"
                    );
                    return Validation::rejected();
                }
                continue;
            }
            collections.push((collection.name, items));
        }

        let mut record = if self.retain_unknown {
            object.clone()
        } else {
            Record::new()
        };

        for (name, value) in resolved {
            record.insert(name.to_string(), value);
        }

        for (name, items) in collections {
            record.insert(
                name.to_string(),
                Value::Array(items.into_iter().map(Value::Object).collect()),
            );
        }

        for field in self.optional {
            let value = match object.get(field.name) {
                Some(value) if !is_empty_value(value) => value.clone(),
                _ => field.default.to_value(),
            };
            record.insert(field.name.to_string(), value);
        }

        Validation {
            accepted: true,
            record,
        }
    }
}

/// Validate every element of a raw list, keeping the accepted records
///
/// A missing or non-array value yields no records.
pub fn validate_items(schema: &RecordSchema, raw: Option<&Value>) -> Vec<Record> {
    raw.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| schema.validate(item).into_record())
                .collect()
        })
        .unwrap_or_default()
}

/// Absent-equivalent values: null, blank strings, empty arrays and objects
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static CHILD: RecordSchema = RecordSchema {
        kind: "child",
        required: &[RequiredField::new("url", FieldRule::Url)],
        optional: &[OptionalField::new("note", DefaultValue::Unknown)],
        collections: &[],
        retain_unknown: false,
    };

    static PARENT: RecordSchema = RecordSchema {
        kind: "parent",
        required: &[
            RequiredField::new("title", FieldRule::Title),
            RequiredField::new("cover", FieldRule::ImageUrl).with_fallback(&["info", "cover"]),
        ],
        optional: &[
            OptionalField::new("tags", DefaultValue::TextList(&["Anime"])),
            OptionalField::new("extra", DefaultValue::EmptyObject),
            OptionalField::new(
                "rating",
                DefaultValue::Object(&[("score", Some("N/A")), ("users", None)]),
            ),
        ],
        collections: &[
            CollectionField {
                name: "children",
                item: &CHILD,
                required: true,
            },
            CollectionField {
                name: "related",
                item: &CHILD,
                required: false,
            },
        ],
        retain_unknown: false,
    };

    fn parent() -> Value {
        json!({
            "title": "Parent Title",
            "cover": "https://example.com/cover.png",
            "children": [
                {"url": "https://example.com/one"},
                {"url": "not a url"},
            ],
            "stray": "dropped",
        })
    }

    #[test]
    fn test_accepts_and_normalizes() {
        let result = PARENT.validate(&parent());
        assert!(result.accepted);

        let record = result.record;
        assert_eq!(record["title"], "Parent Title");
        assert_eq!(record["tags"], json!(["Anime"]));
        assert_eq!(record["extra"], json!({}));
        assert_eq!(record["rating"], json!({"score": "N/A", "users": null}));
        assert_eq!(
            record["children"],
            json!([{"url": "https://example.com/one", "note": "N/A"}])
        );
        assert!(!record.contains_key("related"));
        assert!(!record.contains_key("stray"));
    }

    #[test]
    fn test_required_failure_rejects_without_partial_output() {
        let mut raw = parent();
        raw["title"] = json!("lowercase only");

        let result = PARENT.validate(&raw);
        assert!(!result.accepted);
        assert!(result.record.is_empty());
    }

    #[test]
    fn test_missing_field_is_rejection_not_panic() {
        assert!(!PARENT.validate(&json!({})).accepted);
        assert!(!PARENT.validate(&json!(null)).accepted);
        assert!(!PARENT.validate(&json!(["Parent Title"])).accepted);
        assert!(!PARENT.validate(&json!({"title": 42, "cover": true})).accepted);
    }

    #[test]
    fn test_required_collection_needs_one_valid_item() {
        let mut raw = parent();
        raw["children"] = json!([{"url": "ftp://nope"}]);
        assert!(!PARENT.validate(&raw).accepted);

        raw["children"] = json!("not a list");
        assert!(!PARENT.validate(&raw).accepted);
    }

    #[test]
    fn test_fallback_path_used_when_primary_fails() {
        let mut raw = parent();
        raw["cover"] = json!("N/A");
        raw["info"] = json!({"cover": "https://example.com/fallback.webp"});

        let result = PARENT.validate(&raw);
        assert!(result.accepted);
        assert_eq!(result.record["cover"], "https://example.com/fallback.webp");
    }

    #[test]
    fn test_optional_empty_values_are_defaulted() {
        let mut raw = parent();
        raw["tags"] = json!([]);
        raw["extra"] = json!(null);
        raw["rating"] = json!({"score": "8.1", "users": "1200"});

        let record = PARENT.validate(&raw).record;
        assert_eq!(record["tags"], json!(["Anime"]));
        assert_eq!(record["extra"], json!({}));
        assert_eq!(record["rating"], json!({"score": "8.1", "users": "1200"}));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let first = PARENT.validate(&parent());
        let second = PARENT.validate(&Value::Object(first.record.clone()));
        assert!(second.accepted);
        assert_eq!(first.record, second.record);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let raw = parent();
        let before = raw.clone();
        let _ = PARENT.validate(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_link_fields() {
        let names: Vec<_> = PARENT.link_fields().map(|f| f.name).collect();
        assert_eq!(names, vec!["cover"]);
    }

    #[test]
    fn test_is_empty_value() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("  ")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!("N/A")));
    }
}
