//! Date range normalization, including relative date expressions.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// An absolute date range in epoch milliseconds, inclusive on both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub from: i64,
    /// Inclusive upper bound.
    pub to: i64,
}

/// The units a [`RelativeDate`] may be expressed in.
///
/// Minutes through weeks resolve with fixed millisecond offsets; months and
/// years use calendar math so "3 months back" lands on the same day-of-month
/// where possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeDateUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

/// A date range expressed relative to the current time, e.g. "last 7 days".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeDate {
    /// Number of units back from now.
    pub num: u32,
    /// The unit of the offset.
    pub unit: RelativeDateUnit,
}

/// A date field value as supplied by callers: either an absolute range or a
/// relative expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    /// Relative form, e.g. `{"num": 7, "unit": "days"}`.
    Relative(RelativeDate),
    /// Absolute form, e.g. `{"from": 0, "to": 1000}`.
    Range(DateRange),
}

const MINUTE_MS: i64 = 1000 * 60;
const HOUR_MS: i64 = MINUTE_MS * 60;
const DAY_MS: i64 = HOUR_MS * 24;
const WEEK_MS: i64 = DAY_MS * 7;

/// Resolves a relative date against the given wall-clock time.
///
/// The range always ends at `now`; the start is `now` minus the offset. The
/// clock is an explicit argument so resolution is deterministic under test.
pub fn relative_date_to_date_range(relative: &RelativeDate, now: DateTime<Utc>) -> DateRange {
    let to = now.timestamp_millis();
    let num = i64::from(relative.num);
    let from = match relative.unit {
        RelativeDateUnit::Minutes => to - num * MINUTE_MS,
        RelativeDateUnit::Hours => to - num * HOUR_MS,
        RelativeDateUnit::Days => to - num * DAY_MS,
        RelativeDateUnit::Weeks => to - num * WEEK_MS,
        RelativeDateUnit::Months => calendar_back(now, relative.num).unwrap_or(to),
        RelativeDateUnit::Years => {
            calendar_back(now, relative.num.saturating_mul(12)).unwrap_or(to)
        }
    };
    DateRange { from, to }
}

fn calendar_back(now: DateTime<Utc>, months: u32) -> Option<i64> {
    now.checked_sub_months(Months::new(months))
        .map(|d| d.timestamp_millis())
}

/// Normalizes a date field value into an absolute [`DateRange`].
pub fn to_date_range(value: &DateInput, now: DateTime<Utc>) -> DateRange {
    match value {
        DateInput::Relative(relative) => relative_date_to_date_range(relative, now),
        DateInput::Range(range) => *range,
    }
}

/// Merges two ranges into the union interval.
pub fn merge_date_range(a: &DateRange, b: &DateRange) -> DateRange {
    DateRange {
        from: a.from.min(b.from),
        to: a.to.max(b.to),
    }
}
