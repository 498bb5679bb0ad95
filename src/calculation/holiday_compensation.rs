//! Public holiday compensation.
//!
//! A holiday that lands on a weekend day, or on a day already granted for
//! another holiday, is compensated: it is observed on the first free working
//! day after the block of consecutive holidays it belongs to.
//!
//! ## Algorithm
//!
//! 1. Holidays are sorted by date and split into runs of consecutive calendar
//!    days. Back-to-back holidays behave as one multi-day block.
//! 2. Every holiday on a working day that nobody has claimed yet keeps its own
//!    date. Claims are made in date order.
//! 3. Every other holiday walks forward from the day after its block, skipping
//!    weekend days and claimed days, and claims the first free day it reaches.
//!
//! Already-observed dates passed in by the caller are collision hazards only.
//! They never join a run. The result depends only on the set of holidays, not
//! on the order they are given in: ties on the same date are broken by name.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensatedHoliday, HolidayInput, WeekendConfig};

use super::date_utils::{is_weekend, weekday_name};

/// Default number of days searched when looking for an observed date.
pub const DEFAULT_HOLIDAY_SHIFT_LIMIT: u32 = 14;

/// Why a holiday needs to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShiftCause {
    Weekend,
    Collision,
}

/// Resolves the observed date of every holiday.
///
/// # Arguments
///
/// * `holidays` - The holidays to resolve, in any order
/// * `existing_observed` - Observed dates already granted by other holidays
/// * `weekend` - The company's non-working weekdays
/// * `shift_limit` - How many days to search before giving up
///
/// # Returns
///
/// The compensated holidays sorted by date (ties by name), or:
/// - `Validation` if a holiday has an empty name
/// - `Configuration` if no free working day is found within `shift_limit` days
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use hr_engine::calculation::{compensate_holidays, DEFAULT_HOLIDAY_SHIFT_LIMIT};
/// use hr_engine::models::{HolidayInput, WeekendConfig};
/// use chrono::NaiveDate;
///
/// // 2026-01-16 is a Friday
/// let holidays = vec![HolidayInput::new(
///     "National Day",
///     NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
/// )];
///
/// let result = compensate_holidays(
///     &holidays,
///     &BTreeSet::new(),
///     &WeekendConfig::friday_saturday(),
///     DEFAULT_HOLIDAY_SHIFT_LIMIT,
/// )
/// .unwrap();
///
/// // Saturday is also a weekend day, so the holiday is observed on Sunday
/// assert_eq!(result[0].observed_date, NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
/// assert!(result[0].is_compensated);
/// ```
pub fn compensate_holidays(
    holidays: &[HolidayInput],
    existing_observed: &BTreeSet<NaiveDate>,
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<Vec<CompensatedHoliday>> {
    let mut resolved = compensate_in_input_order(holidays, existing_observed, weekend, shift_limit)?;
    resolved.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
    Ok(resolved)
}

/// Same as [`compensate_holidays`], but the result lines up with `holidays`
/// index for index.
pub(crate) fn compensate_in_input_order(
    holidays: &[HolidayInput],
    existing_observed: &BTreeSet<NaiveDate>,
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<Vec<CompensatedHoliday>> {
    for holiday in holidays {
        if holiday.name.trim().is_empty() {
            return Err(EngineError::validation(
                "name",
                format!("holiday on {} has no name", holiday.date),
            ));
        }
    }

    let mut order: Vec<usize> = (0..holidays.len()).collect();
    order.sort_by(|&a, &b| {
        holidays[a]
            .date
            .cmp(&holidays[b].date)
            .then_with(|| holidays[a].name.cmp(&holidays[b].name))
    });
    let sorted: Vec<&HolidayInput> = order.iter().map(|&i| &holidays[i]).collect();

    let run_ends = run_ends(&sorted);
    let mut claimed = existing_observed.clone();
    let mut observed: Vec<Option<(NaiveDate, Option<ShiftCause>)>> = vec![None; sorted.len()];

    // Working-day holidays claim their own date first.
    for (i, holiday) in sorted.iter().enumerate() {
        if !is_weekend(holiday.date, weekend) && claimed.insert(holiday.date) {
            observed[i] = Some((holiday.date, None));
        }
    }

    for (i, holiday) in sorted.iter().enumerate() {
        if observed[i].is_some() {
            continue;
        }

        let cause = if is_weekend(holiday.date, weekend) {
            ShiftCause::Weekend
        } else {
            ShiftCause::Collision
        };
        let target = find_free_day(run_ends[i], &claimed, weekend, shift_limit).map_err(|e| {
            warn!(
                holiday = %holiday.name,
                date = %holiday.date,
                shift_limit,
                "No observed date found for holiday"
            );
            e
        })?;

        claimed.insert(target);
        debug!(
            holiday = %holiday.name,
            date = %holiday.date,
            observed_date = %target,
            "Holiday compensated"
        );
        observed[i] = Some((target, Some(cause)));
    }

    let mut resolved: Vec<Option<CompensatedHoliday>> = vec![None; holidays.len()];
    for ((holiday, outcome), &index) in sorted.into_iter().zip(observed).zip(&order) {
        let (observed_date, cause) = outcome.ok_or_else(|| EngineError::Configuration {
            message: format!("holiday '{}' was not resolved", holiday.name),
        })?;
        resolved[index] = Some(CompensatedHoliday {
            name: holiday.name.clone(),
            date: holiday.date,
            observed_date,
            is_compensated: cause.is_some(),
            compensation_reason: cause.map(|c| compensation_reason(c, holiday.date, observed_date)),
        });
    }

    resolved
        .into_iter()
        .map(|holiday| {
            holiday.ok_or_else(|| EngineError::Configuration {
                message: "holiday left unresolved".to_string(),
            })
        })
        .collect()
}

/// For each sorted holiday, the last date of the consecutive run it belongs to.
fn run_ends(sorted: &[&HolidayInput]) -> Vec<NaiveDate> {
    let mut ends = vec![NaiveDate::MIN; sorted.len()];
    let mut run_start = 0;

    for i in 0..sorted.len() {
        let continues_run = i > 0 && (sorted[i].date - sorted[i - 1].date).num_days() <= 1;
        if !continues_run && i > 0 {
            let end = sorted[i - 1].date;
            ends[run_start..i].fill(end);
            run_start = i;
        }
    }
    if let Some(last) = sorted.last() {
        ends[run_start..].fill(last.date);
    }

    ends
}

/// Walks forward from the day after `block_end` to the first unclaimed working day.
fn find_free_day(
    block_end: NaiveDate,
    claimed: &BTreeSet<NaiveDate>,
    weekend: &WeekendConfig,
    shift_limit: u32,
) -> EngineResult<NaiveDate> {
    let mut candidate = block_end;
    for _ in 0..shift_limit {
        candidate = candidate.succ_opt().ok_or_else(|| EngineError::Configuration {
            message: format!("no calendar day follows {}", candidate),
        })?;
        if !is_weekend(candidate, weekend) && !claimed.contains(&candidate) {
            return Ok(candidate);
        }
    }

    Err(EngineError::Configuration {
        message: format!(
            "no free working day within {} days after {}; check the weekend configuration {:?}",
            shift_limit,
            block_end,
            weekend.indices()
        ),
    })
}

fn compensation_reason(cause: ShiftCause, date: NaiveDate, observed: NaiveDate) -> String {
    match cause {
        ShiftCause::Weekend => format!(
            "Falls on {} - observed {} {}",
            weekday_name(date.weekday()),
            weekday_name(observed.weekday()),
            observed
        ),
        ShiftCause::Collision => format!(
            "Coincides with another holiday - observed {} {}",
            weekday_name(observed.weekday()),
            observed
        ),
    }
}
