//! Leave type, balance and audit models.
//!
//! This module defines the leave-type catalogue entry [`LeaveType`], the
//! per-year [`LeaveBalance`] row, the append-only [`LeaveBalanceAdjustment`]
//! audit row and the [`LeaveRecord`] produced by admin-entered leave.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A leave type from the company catalogue.
///
/// Leave types are reference data. The ledger reads them but never changes them.
///
/// # Example
///
/// ```
/// use hr_engine::models::LeaveType;
/// use rust_decimal::Decimal;
///
/// let annual = LeaveType {
///     id: "annual".to_string(),
///     name: "Annual Leave".to_string(),
///     color: Some("#2563eb".to_string()),
///     max_days_per_year: Some(Decimal::new(21, 0)),
///     is_paid: true,
///     allow_carryover: true,
///     max_carryover_days: Some(Decimal::new(5, 0)),
///     requires_approval: true,
///     count_weekends: false,
/// };
/// assert_eq!(annual.default_allocation(), Decimal::new(21, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier of the leave type.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display colour used by calendars.
    #[serde(default)]
    pub color: Option<String>,
    /// Yearly allocation; `None` means no default allocation.
    #[serde(default)]
    pub max_days_per_year: Option<Decimal>,
    /// Whether this leave is paid.
    #[serde(default = "default_true")]
    pub is_paid: bool,
    /// Whether unused days roll into the next year.
    #[serde(default)]
    pub allow_carryover: bool,
    /// Cap on carried-over days; `None` means uncapped.
    #[serde(default)]
    pub max_carryover_days: Option<Decimal>,
    /// Whether requests of this type go through approval.
    #[serde(default = "default_true")]
    pub requires_approval: bool,
    /// Whether weekend days inside a request count against the balance.
    #[serde(default)]
    pub count_weekends: bool,
}

fn default_true() -> bool {
    true
}

impl LeaveType {
    /// The opening total for a fresh balance of this type.
    pub fn default_allocation(&self) -> Decimal {
        self.max_days_per_year.unwrap_or(Decimal::ZERO)
    }
}

/// The unique key of a leave balance row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BalanceKey {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The leave type of the balance.
    pub leave_type_id: String,
    /// The balance year.
    pub year: i32,
}

impl BalanceKey {
    /// Creates a new key.
    pub fn new(employee_id: impl Into<String>, leave_type_id: impl Into<String>, year: i32) -> Self {
        Self {
            employee_id: employee_id.into(),
            leave_type_id: leave_type_id.into(),
            year,
        }
    }
}

/// A per-employee, per-leave-type, per-year balance.
///
/// Remaining days are always derived from the stored counters and may be negative.
///
/// # Example
///
/// ```
/// use hr_engine::models::LeaveBalance;
/// use rust_decimal::Decimal;
///
/// let mut balance = LeaveBalance::new("emp_001", "annual", 2026, Decimal::new(21, 0));
/// balance.used_days = Decimal::new(5, 0);
/// balance.pending_days = Decimal::new(2, 0);
/// assert_eq!(balance.remaining_days(), Decimal::new(14, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Unique identifier of the row.
    pub id: Uuid,
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The leave type of the balance.
    pub leave_type_id: String,
    /// The balance year.
    pub year: i32,
    /// Days allocated for the year, including carryover and adjustments.
    pub total_days: Decimal,
    /// Days taken.
    pub used_days: Decimal,
    /// Days requested but not yet decided.
    pub pending_days: Decimal,
}

impl LeaveBalance {
    /// Creates a fresh balance with nothing used or pending.
    pub fn new(
        employee_id: impl Into<String>,
        leave_type_id: impl Into<String>,
        year: i32,
        total_days: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            leave_type_id: leave_type_id.into(),
            year,
            total_days,
            used_days: Decimal::ZERO,
            pending_days: Decimal::ZERO,
        }
    }

    /// `total - used - pending`, unclamped.
    pub fn remaining_days(&self) -> Decimal {
        self.total_days - self.used_days - self.pending_days
    }

    /// Returns true if the remaining days are below zero.
    pub fn is_negative(&self) -> bool {
        self.remaining_days() < Decimal::ZERO
    }

    /// Returns the unique key of this balance.
    pub fn key(&self) -> BalanceKey {
        BalanceKey::new(self.employee_id.clone(), self.leave_type_id.clone(), self.year)
    }
}

/// Why a balance was adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// An administrator changed the allocation by hand.
    Manual,
    /// Unused days carried in from the previous year.
    Carryover,
    /// Days removed because they expired.
    Expiry,
    /// A fix for an earlier mistake.
    Correction,
}

impl std::fmt::Display for AdjustmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentType::Manual => write!(f, "manual"),
            AdjustmentType::Carryover => write!(f, "carryover"),
            AdjustmentType::Expiry => write!(f, "expiry"),
            AdjustmentType::Correction => write!(f, "correction"),
        }
    }
}

/// An append-only audit row recording one change to a balance total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalanceAdjustment {
    /// Unique identifier of the row.
    pub id: Uuid,
    /// The balance that was adjusted.
    pub leave_balance_id: Uuid,
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The leave type of the balance.
    pub leave_type_id: String,
    /// Signed change applied to `total_days`.
    pub adjustment_days: Decimal,
    /// Why the balance was adjusted.
    pub adjustment_type: AdjustmentType,
    /// Free-text reason.
    pub reason: Option<String>,
    /// Who made the adjustment.
    pub adjusted_by: Option<String>,
    /// When the adjustment was recorded.
    pub created_at: DateTime<Utc>,
}

/// Status of a leave record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved and counted as used.
    Approved,
    /// Turned down.
    Rejected,
}

/// A leave request row.
///
/// Rows created by [`crate::ledger::LeaveLedger::record_admin_leave`] are
/// already approved and bypass the request workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Unique identifier of the row.
    pub id: Uuid,
    /// The employee taking leave.
    pub employee_id: String,
    /// The leave type taken.
    pub leave_type_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Days counted against the balance.
    pub days_count: Decimal,
    /// Whether this is a half-day request.
    pub is_half_day: bool,
    /// Workflow status.
    pub status: LeaveStatus,
    /// Free-text reason.
    pub reason: Option<String>,
    /// Who approved the leave.
    pub approved_by: Option<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}
