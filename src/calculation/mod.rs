//! Pure calculation rules for the HR engine.
//!
//! This module contains the date and weekend utilities, public holiday
//! compensation and holiday calendar planning, and offer/payroll monetary
//! totals with offer versioning. Nothing here performs I/O; every function is
//! a deterministic function of its arguments apart from generated ids and
//! timestamps on new rows.

mod date_utils;
mod holiday_compensation;
mod holiday_planner;
mod offer_totals;
mod offer_versioning;

pub use date_utils::{
    checked_days_between_inclusive, days_between_inclusive, is_weekend, weekday_name,
    working_days_between,
};
pub use holiday_compensation::{DEFAULT_HOLIDAY_SHIFT_LIMIT, compensate_holidays};
pub use holiday_planner::{
    HolidayChange, HolidayPlan, HolidayRemoval, add_holiday, copy_to_year, delete_holidays,
    edit_holiday, plan_year,
};
pub use offer_totals::{OfferTotals, compute_offer_totals};
pub use offer_versioning::{OfferRevision, draft_initial_offer, revise_offer};
