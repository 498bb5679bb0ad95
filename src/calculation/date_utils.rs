//! Weekend detection and day-count arithmetic.
//!
//! Every function here is a pure function of its arguments. Weekend days come
//! from an explicitly passed [`WeekendConfig`].

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::WeekendConfig;

/// Returns true if the date falls on a configured weekend day.
///
/// # Example
///
/// ```
/// use hr_engine::calculation::is_weekend;
/// use hr_engine::models::WeekendConfig;
/// use chrono::NaiveDate;
///
/// let weekend = WeekendConfig::friday_saturday();
///
/// // 2026-01-16 is a Friday
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(), &weekend));
/// // 2026-01-18 is a Sunday
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(), &weekend));
/// ```
pub fn is_weekend(date: NaiveDate, weekend: &WeekendConfig) -> bool {
    weekend.contains(date.weekday())
}

/// Counts calendar days from `start` to `end`, both inclusive.
///
/// The caller guarantees `end >= start`; a reversed range yields a count
/// of zero or less. Use [`checked_days_between_inclusive`] when the range
/// comes from user input.
///
/// # Example
///
/// ```
/// use hr_engine::calculation::days_between_inclusive;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// assert_eq!(days_between_inclusive(start, end), 3);
/// assert_eq!(days_between_inclusive(start, start), 1);
/// ```
pub fn days_between_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Counts calendar days inclusively, rejecting an end date before the start date.
pub fn checked_days_between_inclusive(start: NaiveDate, end: NaiveDate) -> EngineResult<i64> {
    if end < start {
        return Err(EngineError::validation(
            "end_date",
            format!("end date {} is before start date {}", end, start),
        ));
    }
    Ok(days_between_inclusive(start, end))
}

/// Counts the working (non-weekend) days in an inclusive range.
///
/// Used for leave types that do not count weekends against the balance.
/// A reversed range counts zero days.
pub fn working_days_between(start: NaiveDate, end: NaiveDate, weekend: &WeekendConfig) -> i64 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !is_weekend(*day, weekend))
        .count() as i64
}

/// Returns the English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
