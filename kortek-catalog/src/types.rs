//! Core types shared by the source, confidence and API layers
//!
//! - [`Weekday`]: schedule day key
//! - Confidence reports: the envelopes returned to callers, each carrying
//!   `confidence_score` next to the validated payload

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::validators::Record;

// ============================================================================
// Weekday
// ============================================================================

/// Day of the release schedule, ordered Monday → Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Capitalized name, as used for response keys
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Lowercase name, as used for upstream queries and cache keys
    pub fn slug(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognized day names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWeekday(pub String);

impl fmt::Display for UnknownWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = Weekday::ALL.iter().map(|d| d.slug()).collect();
        write!(
            f,
            "Invalid day '{}'. Valid days are: {}",
            self.0,
            valid.join(", ")
        )
    }
}

impl std::error::Error for UnknownWeekday {}

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.slug() == wanted)
            .ok_or_else(|| UnknownWeekday(s.to_string()))
    }
}

// ============================================================================
// Confidence reports
// ============================================================================

/// Anything carrying a confidence score
pub trait Scored {
    fn confidence_score(&self) -> f64;

    /// Zero confidence means the response must not be trusted
    fn is_rejected(&self) -> bool {
        self.confidence_score() == 0.0
    }
}

/// Homogeneous list envelope: `{confidence_score, data}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListReport {
    pub confidence_score: f64,
    pub data: Vec<Record>,
}

impl ListReport {
    pub fn rejected() -> Self {
        Self {
            confidence_score: 0.0,
            data: Vec::new(),
        }
    }
}

/// Per-day schedule in upstream key order
pub type DaySchedule = Vec<(String, Vec<Record>)>;

fn serialize_days<S: Serializer>(days: &DaySchedule, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(days.iter().map(|(day, records)| (day, records)))
}

/// Home page composite envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeReport {
    pub confidence_score: f64,
    pub top10: Vec<Record>,
    pub new_eps: Vec<Record>,
    pub movies: Vec<Record>,
    /// Days without a valid item are omitted
    #[serde(serialize_with = "serialize_days")]
    pub jadwal_rilis: DaySchedule,
}

impl HomeReport {
    pub fn rejected() -> Self {
        Self {
            confidence_score: 0.0,
            top10: Vec::new(),
            new_eps: Vec::new(),
            movies: Vec::new(),
            jadwal_rilis: Vec::new(),
        }
    }
}

/// Full-week schedule envelope: `{confidence_score, Monday: [...], ..., Sunday: [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekReport {
    pub confidence_score: f64,
    #[serde(flatten)]
    pub days: BTreeMap<Weekday, Vec<Record>>,
}

impl WeekReport {
    /// Zero score with every weekday present and empty
    pub fn rejected() -> Self {
        Self {
            confidence_score: 0.0,
            days: Weekday::ALL.into_iter().map(|day| (day, Vec::new())).collect(),
        }
    }
}

/// Singleton document envelope: `{confidence_score, ...fields}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub confidence_score: f64,
    #[serde(flatten)]
    pub document: Record,
}

impl DocumentReport {
    pub fn rejected() -> Self {
        Self {
            confidence_score: 0.0,
            document: Record::new(),
        }
    }
}

macro_rules! impl_scored {
    ($($report:ty),*) => {
        $(impl Scored for $report {
            fn confidence_score(&self) -> f64 {
                self.confidence_score
            }
        })*
    };
}

impl_scored!(ListReport, HomeReport, WeekReport, DocumentReport);
