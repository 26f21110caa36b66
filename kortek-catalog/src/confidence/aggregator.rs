//! Homogeneous-list and singleton-document aggregation

use serde_json::Value;
use tracing::{debug, warn};

use super::{link_gate, ScoringPolicy, Tally, FULL_CONFIDENCE};
use crate::types::{DocumentReport, ListReport};
use crate::validators::{validate_items, Record, RecordSchema};

/// Validated section: surviving records plus the counts they were scored on
#[derive(Debug, Clone, Default)]
pub(crate) struct Section {
    pub records: Vec<Record>,
    pub tally: Tally,
}

impl Section {
    /// Validate every item of a raw list; non-list input counts as zero items
    pub fn validate(schema: &RecordSchema, raw: Option<&Value>) -> Self {
        let Some(total) = raw.and_then(Value::as_array).map(Vec::len) else {
            debug!(kind = schema.kind, "Section missing or not a list");
            return Self::default();
        };

        let records = validate_items(schema, raw);
        debug!(
            kind = schema.kind,
            valid = records.len(),
            total,
            "Section validated"
        );

        Self {
            tally: Tally {
                valid: records.len(),
                total,
            },
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Turns raw upstream payloads into confidence reports
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceAggregator {
    policy: ScoringPolicy,
}

impl ConfidenceAggregator {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Score a homogeneous list (search, movies, latest episodes, one schedule day)
    pub fn score_list(&self, schema: &RecordSchema, raw: &Value) -> ListReport {
        if !link_gate::check_items(schema.kind, schema, Some(raw)) {
            return ListReport::rejected();
        }

        let section = Section::validate(schema, Some(raw));
        if section.is_empty() {
            warn!(kind = schema.kind, "No valid items, confidence 0.0");
            return ListReport::rejected();
        }

        let confidence_score = self.policy.score(section.tally.valid, section.tally.total);
        debug!(
            kind = schema.kind,
            valid = section.tally.valid,
            total = section.tally.total,
            confidence_score,
            "List accepted"
        );

        ListReport {
            confidence_score,
            data: section.records,
        }
    }

    /// Score a singleton document (anime detail, episode detail): all or nothing
    pub fn score_document(&self, schema: &RecordSchema, raw: &Value) -> DocumentReport {
        match schema.validate(raw).into_record() {
            Some(document) => {
                debug!(kind = schema.kind, "Document accepted");
                DocumentReport {
                    confidence_score: FULL_CONFIDENCE,
                    document,
                }
            }
            None => {
                warn!(kind = schema.kind, "Document rejected, confidence 0.0");
                DocumentReport::rejected()
            }
        }
    }
}
