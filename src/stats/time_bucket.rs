//! Time bucketing utilities for period rollups
//!
//! - Week buckets: "YYYY-Www" (ISO week, Monday start)
//! - Month buckets: "YYYY-MM"
//! - Year buckets: "YYYY"

use chrono::{Datelike, NaiveDate};

/// Compute the ISO week bucket for a date.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use quizquest::stats::week_bucket;
///
/// let d = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(week_bucket(d), "2026-W43");
/// ```
pub fn week_bucket(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{:04}-W{:02}", week.year(), week.week())
}

/// Compute the month bucket for a date.
pub fn month_bucket(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Compute the year bucket for a date.
pub fn year_bucket(date: NaiveDate) -> String {
    format!("{:04}", date.year())
}
