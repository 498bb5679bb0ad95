//! Core data models for the HR rules engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod holiday;
mod leave;
mod offer;
mod weekend;

pub use audit::{AuditStep, EngineWarning};
pub use holiday::{CompensatedHoliday, HolidayInput, HolidayRecord};
pub use leave::{
    AdjustmentType, BalanceKey, LeaveBalance, LeaveBalanceAdjustment, LeaveRecord, LeaveStatus,
    LeaveType,
};
pub use offer::{
    CompensationInputs, ContributionPolicy, ContributionRates, DEFAULT_EMPLOYEE_CONTRIBUTION_RATE,
    DEFAULT_EMPLOYER_CONTRIBUTION_RATE, OfferChanges, OfferStatus, OfferVersion,
};
pub use weekend::WeekendConfig;
