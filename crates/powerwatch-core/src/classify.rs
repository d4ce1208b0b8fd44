//! Outage classification.
//!
//! Maps one [`RawStatus`] sample to an [`OutageSignal`]. The boolean is
//! date-window aware: an outage needs a sub-type that is not a "none" marker,
//! at least one of start/end date, and an end date that has not elapsed.
//! The category is derived independently and only feeds message text.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::keywords::ClassifierKeywords;
use crate::status::RawStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutageCategory {
    Emergency,
    Urgent,
    Stabilization,
    Scheduled,
    Unspecified,
}

impl std::fmt::Display for OutageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutageCategory::Emergency => write!(f, "emergency"),
            OutageCategory::Urgent => write!(f, "urgent"),
            OutageCategory::Stabilization => write!(f, "stabilization"),
            OutageCategory::Scheduled => write!(f, "scheduled"),
            OutageCategory::Unspecified => write!(f, "unspecified"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutageSignal {
    pub is_outage: bool,
    pub category: OutageCategory,
}

/// Naive formats the provider has been seen to use, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%H:%M %d.%m.%Y",
    "%H:%M:%S %d.%m.%Y",
];

/// Classify one provider sample at instant `now`.
///
/// Never fails: an unparseable `end_date` counts as "not yet elapsed", which
/// keeps an active outage flagged rather than declaring a premature recovery.
#[must_use]
pub fn classify(
    raw: &RawStatus,
    keywords: &ClassifierKeywords,
    now: DateTime<Tz>,
) -> OutageSignal {
    let sub = raw.sub_type().trim().to_lowercase();
    let category = keywords.category_for(&sub);

    OutageSignal {
        is_outage: is_outage(raw, keywords, &sub, now),
        category,
    }
}

fn is_outage(
    raw: &RawStatus,
    keywords: &ClassifierKeywords,
    sub: &str,
    now: DateTime<Tz>,
) -> bool {
    if raw.house.is_none() {
        return false;
    }

    if sub.is_empty() || sub == "-" || keywords.marks_absent(sub) {
        return false;
    }

    let start = raw.start_date();
    let end = raw.end_date();
    if start.is_none() && end.is_none() {
        return false;
    }

    // Unparseable end dates fall through to `true`.
    !end.and_then(|e| parse_provider_timestamp(e, now.timezone()))
        .is_some_and(|end_at| end_at < now)
}

/// Parse a provider timestamp.
///
/// Accepts RFC 3339 and the naive layouts in [`NAIVE_FORMATS`]; naive values
/// are wall-clock time in `tz`. A wall-clock time repeated by a DST fall-back
/// resolves to the earlier instant; one skipped by spring-forward is `None`.
#[must_use]
pub fn parse_provider_timestamp(s: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
