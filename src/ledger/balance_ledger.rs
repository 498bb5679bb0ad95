//! Leave balance ledger operations.
//!
//! Every change to a balance total goes through [`LeaveLedger::apply_delta`],
//! which updates the row and appends one [`LeaveBalanceAdjustment`]. Negative
//! remaining days are allowed; they produce an [`EngineWarning`] instead of an
//! error so administrators can record leave taken in advance.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::checked_days_between_inclusive;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentType, BalanceKey, EngineWarning, LeaveBalance, LeaveBalanceAdjustment, LeaveRecord,
    LeaveStatus, LeaveType,
};

use super::store::{InsertOutcome, LeaveStore};

/// Days counted for a half-day leave.
const HALF_DAY: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// How an administrator wants to change a balance total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum BalanceAdjustment {
    /// Add days to the total.
    Add(Decimal),
    /// Remove days from the total.
    Subtract(Decimal),
    /// Replace the total.
    Set(Decimal),
}

impl BalanceAdjustment {
    /// Converts the adjustment into a signed delta against `current_total`.
    pub fn delta(&self, current_total: Decimal) -> EngineResult<Decimal> {
        match *self {
            BalanceAdjustment::Add(days) => {
                require_positive(days)?;
                Ok(days)
            }
            BalanceAdjustment::Subtract(days) => {
                require_positive(days)?;
                Ok(-days)
            }
            BalanceAdjustment::Set(total) => Ok(total - current_total),
        }
    }
}

fn require_positive(days: Decimal) -> EngineResult<()> {
    if days <= Decimal::ZERO {
        return Err(EngineError::validation(
            "days",
            format!("must be greater than zero, got {}", days),
        ));
    }
    Ok(())
}

/// Counts returned by [`LeaveLedger::initialize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeSummary {
    /// Rows written.
    pub created: usize,
    /// Pairs that already had a row.
    pub skipped: usize,
}

/// A balance written by [`LeaveLedger::assign`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceAssignment {
    /// The new row.
    pub balance: LeaveBalance,
    /// Non-fatal conditions to surface.
    pub warnings: Vec<EngineWarning>,
}

/// The result of a change to a balance total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    /// The balance after the change.
    pub balance: LeaveBalance,
    /// The audit row appended for the change.
    pub adjustment: LeaveBalanceAdjustment,
    /// Non-fatal conditions to surface.
    pub warnings: Vec<EngineWarning>,
}

/// Leave an administrator records directly, bypassing the request workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLeaveRequest {
    /// Employee taking the leave.
    pub employee_id: String,
    /// Leave type charged.
    pub leave_type_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Counts 0.5 days regardless of the range.
    #[serde(default)]
    pub is_half_day: bool,
    /// Why the leave was recorded.
    #[serde(default)]
    pub reason: Option<String>,
    /// Administrator who approved it.
    #[serde(default)]
    pub approved_by: Option<String>,
}

impl AdminLeaveRequest {
    /// A full-day request with no reason or approver.
    pub fn new(
        employee_id: impl Into<String>,
        leave_type_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            leave_type_id: leave_type_id.into(),
            start_date,
            end_date,
            is_half_day: false,
            reason: None,
            approved_by: None,
        }
    }
}

/// The result of recording leave on behalf of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLeave {
    /// The approved leave record.
    pub record: LeaveRecord,
    /// The balance after the leave was counted.
    pub balance: LeaveBalance,
    /// Non-fatal conditions to surface.
    pub warnings: Vec<EngineWarning>,
}

/// Leave balance ledger over a [`LeaveStore`].
///
/// # Example
///
/// ```
/// use hr_engine::ledger::{BalanceAdjustment, InMemoryLeaveStore, LeaveLedger};
/// use hr_engine::models::AdjustmentType;
/// use rust_decimal::Decimal;
///
/// let mut ledger = LeaveLedger::new(InMemoryLeaveStore::new());
/// let balance = ledger
///     .assign("emp_001", "annual", 2026, Decimal::new(21, 0))
///     .unwrap()
///     .balance;
///
/// let change = ledger
///     .adjust(
///         balance.id,
///         BalanceAdjustment::Subtract(Decimal::new(30, 0)),
///         AdjustmentType::Manual,
///         Some("advance leave".to_string()),
///         Some("hr_admin".to_string()),
///     )
///     .unwrap();
///
/// assert_eq!(change.balance.total_days, Decimal::new(-9, 0));
/// assert_eq!(change.warnings.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeaveLedger<S> {
    store: S,
}

impl<S: LeaveStore> LeaveLedger<S> {
    /// Creates a ledger over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the ledger and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Looks up a balance by its unique key.
    pub fn find_balance(
        &self,
        employee_id: &str,
        leave_type_id: &str,
        year: i32,
    ) -> EngineResult<Option<LeaveBalance>> {
        self.store
            .find_balance(&BalanceKey::new(employee_id, leave_type_id, year))
    }

    /// Creates a default balance for every (employee, leave type) pair that has none.
    ///
    /// Existing rows are never touched, so running this twice creates nothing
    /// the second time.
    pub fn initialize(
        &mut self,
        employee_ids: &[String],
        year: i32,
        leave_types: &[LeaveType],
    ) -> EngineResult<InitializeSummary> {
        let mut summary = InitializeSummary::default();

        for employee_id in employee_ids {
            for leave_type in leave_types {
                let balance = LeaveBalance::new(
                    employee_id.as_str(),
                    leave_type.id.as_str(),
                    year,
                    leave_type.default_allocation(),
                );
                match self.store.insert_balance(balance)? {
                    InsertOutcome::Inserted => summary.created += 1,
                    InsertOutcome::Conflict => {
                        debug!(
                            employee_id = %employee_id,
                            leave_type_id = %leave_type.id,
                            year,
                            "Balance already exists, skipping"
                        );
                        summary.skipped += 1;
                    }
                }
            }
        }

        info!(
            year,
            created = summary.created,
            skipped = summary.skipped,
            "Leave balances initialized"
        );
        Ok(summary)
    }

    /// Creates one balance with an explicit total.
    ///
    /// Fails with `DuplicateBalance` if a row already exists for the key.
    pub fn assign(
        &mut self,
        employee_id: &str,
        leave_type_id: &str,
        year: i32,
        total_days: Decimal,
    ) -> EngineResult<BalanceAssignment> {
        let balance = LeaveBalance::new(employee_id, leave_type_id, year, total_days);

        if self.store.insert_balance(balance.clone())? == InsertOutcome::Conflict {
            return Err(EngineError::DuplicateBalance {
                employee_id: employee_id.to_string(),
                leave_type_id: leave_type_id.to_string(),
                year,
            });
        }

        info!(
            balance_id = %balance.id,
            employee_id,
            leave_type_id,
            year,
            total_days = %total_days,
            "Leave balance assigned"
        );

        let warnings = negative_balance_warning(&balance).into_iter().collect();
        Ok(BalanceAssignment { balance, warnings })
    }

    /// Changes a balance total by adding, subtracting or setting days.
    ///
    /// A `Set` is logged as the signed difference from the current total.
    pub fn adjust(
        &mut self,
        balance_id: Uuid,
        adjustment: BalanceAdjustment,
        adjustment_type: AdjustmentType,
        reason: Option<String>,
        adjusted_by: Option<String>,
    ) -> EngineResult<BalanceChange> {
        let balance = self.require_balance(balance_id)?;
        let delta = adjustment.delta(balance.total_days)?;
        self.apply_delta(balance_id, delta, adjustment_type, reason, adjusted_by)
    }

    /// Applies a signed change to a balance total and appends its audit row.
    ///
    /// # Errors
    ///
    /// - `Validation` if `adjustment_days` is zero
    /// - `BalanceNotFound` if no balance has `balance_id`
    pub fn apply_delta(
        &mut self,
        balance_id: Uuid,
        adjustment_days: Decimal,
        adjustment_type: AdjustmentType,
        reason: Option<String>,
        adjusted_by: Option<String>,
    ) -> EngineResult<BalanceChange> {
        if adjustment_days.is_zero() {
            return Err(EngineError::validation(
                "adjustment_days",
                "adjustment must not be zero",
            ));
        }

        let mut balance = self.require_balance(balance_id)?;
        let previous_total = balance.total_days;
        balance.total_days += adjustment_days;
        self.store.update_balance(&balance)?;

        let adjustment = LeaveBalanceAdjustment {
            id: Uuid::new_v4(),
            leave_balance_id: balance.id,
            employee_id: balance.employee_id.clone(),
            leave_type_id: balance.leave_type_id.clone(),
            adjustment_days,
            adjustment_type,
            reason,
            adjusted_by,
            created_at: Utc::now(),
        };
        self.store.append_adjustment(adjustment.clone())?;

        info!(
            balance_id = %balance.id,
            adjustment_type = %adjustment_type,
            adjustment_days = %adjustment_days,
            previous_total = %previous_total,
            new_total = %balance.total_days,
            "Leave balance adjusted"
        );

        let warnings = negative_balance_warning(&balance).into_iter().collect();
        Ok(BalanceChange {
            balance,
            adjustment,
            warnings,
        })
    }

    /// Records approved leave for an employee without the request workflow.
    ///
    /// A half day counts 0.5 days whatever the range; otherwise every calendar
    /// day in the inclusive range counts. The balance for the start date's
    /// year must already exist. The balance is written before the leave
    /// record, so a failed balance write leaves no orphaned record.
    pub fn record_admin_leave(&mut self, request: AdminLeaveRequest) -> EngineResult<AdminLeave> {
        let calendar_days = checked_days_between_inclusive(request.start_date, request.end_date)?;
        let days_count = if request.is_half_day {
            HALF_DAY
        } else {
            Decimal::from(calendar_days)
        };

        let year = request.start_date.year();
        let mut balance = self
            .store
            .find_balance(&BalanceKey::new(
                &request.employee_id,
                &request.leave_type_id,
                year,
            ))?
            .ok_or_else(|| {
                EngineError::balance_not_found_for(
                    &request.employee_id,
                    &request.leave_type_id,
                    year,
                )
            })?;

        balance.used_days += days_count;
        self.store.update_balance(&balance)?;

        let record = LeaveRecord {
            id: Uuid::new_v4(),
            employee_id: request.employee_id,
            leave_type_id: request.leave_type_id,
            start_date: request.start_date,
            end_date: request.end_date,
            days_count,
            is_half_day: request.is_half_day,
            status: LeaveStatus::Approved,
            reason: request.reason,
            approved_by: request.approved_by,
            created_at: Utc::now(),
        };
        self.store.insert_leave_record(record.clone())?;

        info!(
            leave_id = %record.id,
            balance_id = %balance.id,
            employee_id = %record.employee_id,
            leave_type_id = %record.leave_type_id,
            days = %days_count,
            remaining = %balance.remaining_days(),
            "Admin leave recorded"
        );

        let warnings = negative_balance_warning(&balance).into_iter().collect();
        Ok(AdminLeave {
            record,
            balance,
            warnings,
        })
    }

    /// Returns `total - used - pending` for a balance.
    pub fn remaining(&self, balance_id: Uuid) -> EngineResult<Decimal> {
        Ok(self.require_balance(balance_id)?.remaining_days())
    }

    /// Returns the audit rows of a balance, oldest first.
    pub fn balance_history(&self, balance_id: Uuid) -> EngineResult<Vec<LeaveBalanceAdjustment>> {
        self.require_balance(balance_id)?;
        self.store.adjustments_for(balance_id)
    }

    fn require_balance(&self, balance_id: Uuid) -> EngineResult<LeaveBalance> {
        self.store
            .get_balance(balance_id)?
            .ok_or_else(|| EngineError::balance_not_found_by_id(balance_id))
    }
}

fn negative_balance_warning(balance: &LeaveBalance) -> Option<EngineWarning> {
    if !balance.is_negative() {
        return None;
    }

    let warning = EngineWarning::NegativeBalance {
        balance_id: balance.id,
        employee_id: balance.employee_id.clone(),
        leave_type_id: balance.leave_type_id.clone(),
        year: balance.year,
        remaining_days: balance.remaining_days(),
    };
    warn!(
        balance_id = %balance.id,
        remaining_days = %balance.remaining_days(),
        "{}",
        warning.message()
    );
    Some(warning)
}
