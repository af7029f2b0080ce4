//! Recurrence rollover calculation.
//!
//! When an occurrence of a repeating task completes, the repository calls
//! [`next_occurrence`] to materialize the next one. Daily and weekly
//! recurrence are plain day arithmetic; monthly recurrence preserves the
//! day-of-month and clips to the target month's actual length, so Jan 31
//! rolls to Feb 29 in leap years and Feb 28 otherwise.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RecurrenceError;

/// How often a task repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceKind {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Recurrence specification attached to a persisted task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceSpec {
    pub kind: RecurrenceKind,
    /// Every N days/weeks/months. Must be >= 1.
    pub interval: u32,
}

impl RecurrenceSpec {
    pub fn new(kind: RecurrenceKind, interval: u32) -> Self {
        Self { kind, interval }
    }

    /// Parse from a storage label.
    ///
    /// Formats: `"daily"`, `"weekly"`, `"monthly"`, or with an interval
    /// suffix: `"daily:3"`, `"weekly:2"`, `"monthly:6"`.
    pub fn parse(s: &str) -> Result<Self, RecurrenceError> {
        let lower = s.trim().to_lowercase();
        let (kind_str, interval) = match lower.split_once(':') {
            Some((kind, n)) => {
                let interval: u32 = n
                    .trim()
                    .parse()
                    .map_err(|_| RecurrenceError::ParseFailed(s.to_string()))?;
                (kind.trim(), interval)
            }
            None => (lower.as_str(), 1),
        };
        if interval == 0 {
            return Err(RecurrenceError::InvalidInterval(0));
        }
        let kind = match kind_str {
            "daily" => RecurrenceKind::Daily,
            "weekly" => RecurrenceKind::Weekly,
            "monthly" => RecurrenceKind::Monthly,
            _ => return Err(RecurrenceError::ParseFailed(s.to_string())),
        };
        Ok(Self { kind, interval })
    }

    /// Serialize to a storage label.
    pub fn as_label(&self) -> String {
        if self.interval == 1 {
            self.kind.as_label().to_string()
        } else {
            format!("{}:{}", self.kind.as_label(), self.interval)
        }
    }
}

impl fmt::Display for RecurrenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_label())
    }
}

/// Number of days in the given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Add whole months to a date, clipping the day-of-month to the target
/// month's length when the source day doesn't exist there.
fn add_months_clipped(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Compute the next due date for a date-only (no due time) task.
///
/// # Errors
/// Returns [`RecurrenceError::InvalidInterval`] if `spec.interval == 0`.
pub fn next_occurrence_date(
    last_due: NaiveDate,
    spec: &RecurrenceSpec,
) -> Result<NaiveDate, RecurrenceError> {
    if spec.interval == 0 {
        return Err(RecurrenceError::InvalidInterval(spec.interval));
    }
    let next = match spec.kind {
        RecurrenceKind::Daily => last_due + Duration::days(spec.interval as i64),
        RecurrenceKind::Weekly => last_due + Duration::days(7 * spec.interval as i64),
        RecurrenceKind::Monthly => add_months_clipped(last_due, spec.interval),
    };
    Ok(next)
}

/// Compute the next due instant for a completed recurring task.
///
/// Time-of-day is preserved for all recurrence kinds. Monthly rollover
/// clips to the target month's last day when the source day-of-month
/// doesn't exist there (Jan 31 → Feb 29 / Feb 28).
///
/// # Errors
/// Returns [`RecurrenceError::InvalidInterval`] if `spec.interval == 0`.
pub fn next_occurrence(
    last_due: DateTime<Utc>,
    spec: &RecurrenceSpec,
) -> Result<DateTime<Utc>, RecurrenceError> {
    let next_date = next_occurrence_date(last_due.date_naive(), spec)?;
    let next = next_date.and_time(last_due.time());
    Ok(Utc.from_utc_datetime(&next))
}
