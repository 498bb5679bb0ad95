//! Public holiday models.
//!
//! This module contains the caller-supplied [`HolidayInput`], the calculator's
//! [`CompensatedHoliday`] output, and the persisted [`HolidayRecord`] row.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named holiday date supplied by a caller.
///
/// # Example
///
/// ```
/// use hr_engine::models::HolidayInput;
/// use chrono::NaiveDate;
///
/// let holiday = HolidayInput::new("National Day", NaiveDate::from_ymd_opt(2026, 9, 23).unwrap());
/// assert_eq!(holiday.name, "National Day");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInput {
    /// The name of the holiday.
    pub name: String,
    /// The calendar date of the holiday.
    pub date: NaiveDate,
}

impl HolidayInput {
    /// Creates a new holiday input.
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}

/// A holiday with its observed date resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensatedHoliday {
    /// The name of the holiday.
    pub name: String,
    /// The natural calendar date of the holiday.
    pub date: NaiveDate,
    /// The working day actually granted off for this holiday.
    pub observed_date: NaiveDate,
    /// True if the observed date was shifted away from the natural date.
    pub is_compensated: bool,
    /// Why the holiday was shifted, if it was.
    pub compensation_reason: Option<String>,
}

/// A persisted public holiday row.
///
/// `year` always derives from the natural `date`, never from `observed_date`,
/// so a late-December holiday observed in January stays in its own year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// Unique identifier of the row.
    pub id: Uuid,
    /// The name of the holiday.
    pub name: String,
    /// The natural calendar date of the holiday.
    pub date: NaiveDate,
    /// The working day actually granted off.
    pub observed_date: NaiveDate,
    /// The year of the natural date.
    pub year: i32,
    /// True if the observed date differs from the natural date.
    pub is_compensated: bool,
    /// Why the holiday was shifted, if it was.
    pub compensation_reason: Option<String>,
}

impl HolidayRecord {
    /// Creates a new row with a generated id from a calculator result.
    pub fn from_compensated(holiday: CompensatedHoliday) -> Self {
        Self::with_id(Uuid::new_v4(), holiday)
    }

    /// Creates a row with a known id, used when an existing holiday is re-derived.
    pub fn with_id(id: Uuid, holiday: CompensatedHoliday) -> Self {
        Self {
            id,
            year: holiday.date.year(),
            name: holiday.name,
            date: holiday.date,
            observed_date: holiday.observed_date,
            is_compensated: holiday.is_compensated,
            compensation_reason: holiday.compensation_reason,
        }
    }

    /// Returns true if this row has the given name and natural date.
    pub fn matches(&self, name: &str, date: NaiveDate) -> bool {
        self.date == date && self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}
