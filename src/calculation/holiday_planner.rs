//! Holiday calendar maintenance.
//!
//! Turns [`compensate_holidays`] output into [`HolidayRecord`] rows for the
//! persistence collaborator: bulk year loads, single additions, edits,
//! deletions and copying a year's holidays into another year.
//!
//! Every entry point re-derives the observed dates of the whole calendar it is
//! given from natural dates. A calendar built one holiday at a time therefore
//! ends up exactly as a bulk load of the same holidays would, and rows already
//! on file whose observed date moves come back as updates.
//!
//! [`compensate_holidays`]: super::compensate_holidays

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensatedHoliday, HolidayInput, HolidayRecord, WeekendConfig};

use super::holiday_compensation::compensate_in_input_order;

/// Rows to write for a bulk holiday load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayPlan {
    /// New rows, sorted by date.
    pub to_insert: Vec<HolidayRecord>,
    /// Rows already on file whose observed date changed.
    pub to_update: Vec<HolidayRecord>,
    /// Inputs skipped because the same (name, date) is already on file or repeated.
    pub skipped: Vec<HolidayInput>,
}

/// The result of adding or editing one holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayChange {
    /// The added or edited row.
    pub record: HolidayRecord,
    /// Other rows whose observed date changed as a consequence.
    pub updated: Vec<HolidayRecord>,
}

/// The result of deleting holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRemoval {
    /// The remaining rows, re-derived without the deleted ones.
    pub kept: Vec<HolidayRecord>,
    /// The deleted rows.
    pub removed: Vec<HolidayRecord>,
    /// Remaining rows whose observed date changed.
    pub updated: Vec<HolidayRecord>,
}

/// Plans a bulk load of holidays.
///
/// Inputs whose (name, date) already exists in `existing` or appears earlier in
/// `inputs` are skipped, which makes re-running the same load harmless.
///
/// # Example
///
/// ```
/// use hr_engine::calculation::{plan_year, DEFAULT_HOLIDAY_SHIFT_LIMIT};
/// use hr_engine::models::{HolidayInput, WeekendConfig};
/// use chrono::NaiveDate;
///
/// let inputs = vec![
///     HolidayInput::new("Founding Day", NaiveDate::from_ymd_opt(2026, 2, 22).unwrap()),
///     HolidayInput::new("National Day", NaiveDate::from_ymd_opt(2026, 9, 23).unwrap()),
/// ];
///
/// let plan = plan_year(&inputs, &[], &WeekendConfig::friday_saturday(), DEFAULT_HOLIDAY_SHIFT_LIMIT).unwrap();
/// assert_eq!(plan.to_insert.len(), 2);
///
/// let rerun = plan_year(&inputs, &plan.to_insert, &WeekendConfig::friday_saturday(), DEFAULT_HOLIDAY_SHIFT_LIMIT).unwrap();
/// assert!(rerun.to_insert.is_empty());
/// assert!(rerun.to_update.is_empty());
/// assert_eq!(rerun.skipped.len(), 2);
/// ```
pub fn plan_year(
    inputs: &[HolidayInput],
    existing: &[HolidayRecord],
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<HolidayPlan> {
    let mut fresh: Vec<HolidayInput> = Vec::new();
    let mut skipped = Vec::new();

    for input in inputs {
        let on_file = existing.iter().any(|r| r.matches(&input.name, input.date));
        let repeated = fresh
            .iter()
            .any(|f| f.date == input.date && same_name(&f.name, &input.name));
        if on_file || repeated {
            debug!(holiday = %input.name, date = %input.date, "Skipping duplicate holiday");
            skipped.push(input.clone());
        } else {
            fresh.push(input.clone());
        }
    }

    let (refreshed, created) = rederive(existing, &fresh, weekend, shift_limit)?;
    let mut to_insert: Vec<HolidayRecord> = created
        .into_iter()
        .map(HolidayRecord::from_compensated)
        .collect();
    to_insert.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
    let to_update = changed_rows(existing, refreshed);

    info!(
        inserted = to_insert.len(),
        updated = to_update.len(),
        skipped = skipped.len(),
        compensated = to_insert.iter().filter(|r| r.is_compensated).count(),
        "Holiday plan prepared"
    );

    Ok(HolidayPlan {
        to_insert,
        to_update,
        skipped,
    })
}

/// Plans a single holiday addition.
///
/// Unlike a bulk load, adding a holiday that is already on file is an error.
/// `existing` is the calendar the holiday joins; rows in it whose observed
/// date moves because of the new holiday are returned in `updated`.
///
/// # Example
///
/// ```
/// use hr_engine::calculation::{add_holiday, DEFAULT_HOLIDAY_SHIFT_LIMIT};
/// use hr_engine::models::{HolidayInput, WeekendConfig};
/// use chrono::NaiveDate;
///
/// let weekend = WeekendConfig::friday_saturday();
/// let saturday = HolidayInput::new("Saturday Holiday", NaiveDate::from_ymd_opt(2026, 1, 17).unwrap());
/// let first = add_holiday(&saturday, &[], &weekend, DEFAULT_HOLIDAY_SHIFT_LIMIT).unwrap();
///
/// // Sunday is a working day; the new holiday takes it back
/// let sunday = HolidayInput::new("Sunday Holiday", NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
/// let second = add_holiday(&sunday, &[first.record], &weekend, DEFAULT_HOLIDAY_SHIFT_LIMIT).unwrap();
///
/// assert!(!second.record.is_compensated);
/// assert_eq!(second.updated[0].observed_date, NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
/// ```
pub fn add_holiday(
    input: &HolidayInput,
    existing: &[HolidayRecord],
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<HolidayChange> {
    if existing.iter().any(|r| r.matches(&input.name, input.date)) {
        return Err(duplicate_holiday(&input.name, input.date));
    }

    let (refreshed, created) = rederive(existing, std::slice::from_ref(input), weekend, shift_limit)?;
    let record = single(created).map(HolidayRecord::from_compensated)?;
    let updated = changed_rows(existing, refreshed);

    info!(
        holiday = %record.name,
        observed_date = %record.observed_date,
        updated = updated.len(),
        "Holiday added"
    );

    Ok(HolidayChange { record, updated })
}

/// Re-derives a holiday after its name or date changed.
///
/// The edited row keeps its id. Every other row in `existing` is re-derived
/// alongside it, so rows freed up by the old date or displaced by the new one
/// come back in `updated`.
pub fn edit_holiday(
    record: &HolidayRecord,
    name: &str,
    date: NaiveDate,
    existing: &[HolidayRecord],
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<HolidayChange> {
    let others: Vec<HolidayRecord> = existing
        .iter()
        .filter(|r| r.id != record.id)
        .cloned()
        .collect();

    if others.iter().any(|r| r.matches(name, date)) {
        return Err(duplicate_holiday(name, date));
    }

    let input = HolidayInput::new(name, date);
    let (refreshed, created) = rederive(&others, std::slice::from_ref(&input), weekend, shift_limit)?;
    let edited = single(created).map(|c| HolidayRecord::with_id(record.id, c))?;

    Ok(HolidayChange {
        record: edited,
        updated: changed_rows(&others, refreshed),
    })
}

/// Removes the holidays whose ids are listed.
///
/// The remaining rows are re-derived, so a holiday that had been pushed off a
/// date by a deleted one moves back.
pub fn delete_holidays(
    records: &[HolidayRecord],
    ids: &[Uuid],
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<HolidayRemoval> {
    let (removed, remaining): (Vec<HolidayRecord>, Vec<HolidayRecord>) =
        records.iter().cloned().partition(|r| ids.contains(&r.id));

    let (kept, _) = rederive(&remaining, &[], weekend, shift_limit)?;
    let updated = changed_rows(&remaining, kept.clone());

    info!(
        removed = removed.len(),
        kept = kept.len(),
        updated = updated.len(),
        "Holidays deleted"
    );

    Ok(HolidayRemoval {
        kept,
        removed,
        updated,
    })
}

/// Plans copying holidays into another year.
///
/// Each holiday keeps its month and day; February 29 becomes February 28 in a
/// common year. The copied dates are compensated together with `target_existing`.
pub fn copy_to_year(
    source: &[HolidayRecord],
    target_year: i32,
    target_existing: &[HolidayRecord],
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<HolidayPlan> {
    let inputs = source
        .iter()
        .map(|record| {
            let date = same_day_in_year(record.date, target_year)?;
            Ok(HolidayInput::new(record.name.clone(), date))
        })
        .collect::<EngineResult<Vec<HolidayInput>>>()?;

    plan_year(&inputs, target_existing, weekend, shift_limit)
}

/// Compensates `existing` and `fresh` as one calendar.
///
/// Returns the existing rows with re-derived observed dates, ids kept, and the
/// compensated fresh inputs in their given order.
fn rederive(
    existing: &[HolidayRecord],
    fresh: &[HolidayInput],
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<(Vec<HolidayRecord>, Vec<CompensatedHoliday>)> {
    let inputs: Vec<HolidayInput> = existing
        .iter()
        .map(|r| HolidayInput::new(r.name.clone(), r.date))
        .chain(fresh.iter().cloned())
        .collect();

    let mut resolved = compensate_in_input_order(&inputs, &BTreeSet::new(), weekend, shift_limit)?;
    let created = resolved.split_off(existing.len());
    let refreshed = existing
        .iter()
        .zip(resolved)
        .map(|(row, holiday)| HolidayRecord::with_id(row.id, holiday))
        .collect();

    Ok((refreshed, created))
}

/// The rows of `after` that differ from their counterpart in `before`.
fn changed_rows(before: &[HolidayRecord], after: Vec<HolidayRecord>) -> Vec<HolidayRecord> {
    before
        .iter()
        .zip(after)
        .filter(|(old, new)| *old != new)
        .map(|(_, new)| new)
        .collect()
}

fn single(created: Vec<CompensatedHoliday>) -> EngineResult<CompensatedHoliday> {
    created
        .into_iter()
        .next()
        .ok_or_else(|| EngineError::validation("holiday", "no holiday was resolved"))
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn same_day_in_year(date: NaiveDate, year: i32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), date.day() - 1))
        .ok_or_else(|| {
            EngineError::validation("date", format!("{} has no counterpart in {}", date, year))
        })
}

fn duplicate_holiday(name: &str, date: NaiveDate) -> EngineError {
    EngineError::validation(
        "name",
        format!("holiday '{}' on {} already exists", name.trim(), date),
    )
}
