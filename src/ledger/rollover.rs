//! Year-end rollover of leave balances.
//!
//! For each employee and leave type, the balance of `from_year + 1` is
//! opened at the default allocation. Leave types that allow carryover then
//! receive the unused days of `from_year`, capped by `max_carryover_days`,
//! as a `carryover` adjustment on the new balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentType, LeaveBalance, LeaveType};

use super::balance_ledger::LeaveLedger;
use super::store::{InsertOutcome, LeaveStore};

/// Counts returned by [`process_rollover`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverSummary {
    /// New-year balances written.
    pub balances_created: usize,
    /// Carryover adjustments applied.
    pub carryovers_applied: usize,
    /// Pairs left untouched.
    pub skipped: usize,
}

/// Days a balance may carry into the next year under `leave_type`.
///
/// Returns zero for types that do not allow carryover. Negative remaining
/// days carry nothing.
///
/// # Example
///
/// ```
/// use hr_engine::ledger::carryover_days;
/// use hr_engine::models::{LeaveBalance, LeaveType};
/// use rust_decimal::Decimal;
///
/// let annual = LeaveType {
///     id: "annual".to_string(),
///     name: "Annual Leave".to_string(),
///     color: None,
///     max_days_per_year: Some(Decimal::new(21, 0)),
///     is_paid: true,
///     allow_carryover: true,
///     max_carryover_days: Some(Decimal::new(5, 0)),
///     requires_approval: true,
///     count_weekends: false,
/// };
/// let mut balance = LeaveBalance::new("emp_001", "annual", 2025, Decimal::new(21, 0));
/// balance.used_days = Decimal::new(10, 0);
///
/// assert_eq!(carryover_days(&balance, &annual), Decimal::new(5, 0));
/// ```
pub fn carryover_days(balance: &LeaveBalance, leave_type: &LeaveType) -> Decimal {
    if !leave_type.allow_carryover {
        return Decimal::ZERO;
    }

    let unused = balance.remaining_days().max(Decimal::ZERO);
    match leave_type.max_carryover_days {
        Some(cap) => unused.min(cap.max(Decimal::ZERO)),
        None => unused,
    }
}

/// Opens next year's balances and carries unused days forward.
///
/// Safe to re-run: a pair whose new-year balance already exists is skipped
/// without a second carryover.
///
/// # Arguments
///
/// * `ledger` - The ledger holding both years' balances
/// * `from_year` - The year being closed
/// * `employee_ids` - Employees to roll over
/// * `leave_types` - The leave type catalogue
/// * `adjusted_by` - Recorded on every carryover audit row
pub fn process_rollover<S: LeaveStore>(
    ledger: &mut LeaveLedger<S>,
    from_year: i32,
    employee_ids: &[String],
    leave_types: &[LeaveType],
    adjusted_by: Option<&str>,
) -> EngineResult<RolloverSummary> {
    let to_year = from_year
        .checked_add(1)
        .ok_or_else(|| EngineError::validation("from_year", "year overflow"))?;
    let mut summary = RolloverSummary::default();

    for employee_id in employee_ids {
        for leave_type in leave_types {
            if ledger
                .find_balance(employee_id, &leave_type.id, to_year)?
                .is_some()
            {
                debug!(
                    employee_id = %employee_id,
                    leave_type_id = %leave_type.id,
                    to_year,
                    "Next-year balance exists, skipping"
                );
                summary.skipped += 1;
                continue;
            }

            let carryover = if leave_type.allow_carryover {
                match ledger.find_balance(employee_id, &leave_type.id, from_year)? {
                    Some(previous) => carryover_days(&previous, leave_type),
                    None => {
                        debug!(
                            employee_id = %employee_id,
                            leave_type_id = %leave_type.id,
                            from_year,
                            "No balance to carry over, skipping"
                        );
                        summary.skipped += 1;
                        continue;
                    }
                }
            } else {
                Decimal::ZERO
            };

            let fresh = LeaveBalance::new(
                employee_id.as_str(),
                leave_type.id.as_str(),
                to_year,
                leave_type.default_allocation(),
            );
            let balance_id = fresh.id;
            if ledger.store_mut().insert_balance(fresh)? == InsertOutcome::Conflict {
                summary.skipped += 1;
                continue;
            }
            summary.balances_created += 1;

            if carryover > Decimal::ZERO {
                ledger.apply_delta(
                    balance_id,
                    carryover,
                    AdjustmentType::Carryover,
                    Some(format!("Carryover from {}", from_year)),
                    adjusted_by.map(str::to_string),
                )?;
                summary.carryovers_applied += 1;
            }
        }
    }

    info!(
        from_year,
        to_year,
        balances_created = summary.balances_created,
        carryovers_applied = summary.carryovers_applied,
        skipped = summary.skipped,
        "Year-end rollover processed"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLeaveStore;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn leave_type(id: &str, allow_carryover: bool, max_carryover: Option<&str>) -> LeaveType {
        LeaveType {
            id: id.to_string(),
            name: id.to_string(),
            color: None,
            max_days_per_year: Some(dec("21")),
            is_paid: true,
            allow_carryover,
            max_carryover_days: max_carryover.map(dec),
            requires_approval: true,
            count_weekends: false,
        }
    }

    fn ledger_with_usage(used: &str) -> LeaveLedger<InMemoryLeaveStore> {
        let mut ledger = LeaveLedger::new(InMemoryLeaveStore::new());
        let mut balance = ledger
            .assign("emp_001", "annual", 2025, dec("21"))
            .unwrap()
            .balance;
        balance.used_days = dec(used);
        ledger.store_mut().update_balance(&balance).unwrap();
        ledger
    }

    fn employees() -> Vec<String> {
        vec!["emp_001".to_string()]
    }

    /// RO-001: Unused days carried forward up to the cap
    #[test]
    fn test_carryover_is_capped() {
        let mut ledger = ledger_with_usage("10");
        let types = [leave_type("annual", true, Some("5"))];

        let summary = process_rollover(&mut ledger, 2025, &employees(), &types, Some("hr_admin"))
            .unwrap();

        assert_eq!(
            summary,
            RolloverSummary {
                balances_created: 1,
                carryovers_applied: 1,
                skipped: 0
            }
        );
        let next = ledger.find_balance("emp_001", "annual", 2026).unwrap().unwrap();
        assert_eq!(next.total_days, dec("26"));

        let history = ledger.balance_history(next.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].adjustment_days, dec("5"));
        assert_eq!(history[0].adjustment_type, AdjustmentType::Carryover);
        assert_eq!(history[0].leave_balance_id, next.id);
        assert_eq!(history[0].adjusted_by.as_deref(), Some("hr_admin"));
    }

    #[test]
    fn test_uncapped_carryover_takes_all_unused() {
        let mut ledger = ledger_with_usage("10");
        let types = [leave_type("annual", true, None)];

        process_rollover(&mut ledger, 2025, &employees(), &types, None).unwrap();

        let next = ledger.find_balance("emp_001", "annual", 2026).unwrap().unwrap();
        assert_eq!(next.total_days, dec("32"));
    }

    /// RO-002: Re-running the rollover applies nothing twice
    #[test]
    fn test_rerun_does_not_double_carryover() {
        let mut ledger = ledger_with_usage("10");
        let types = [leave_type("annual", true, Some("5"))];

        process_rollover(&mut ledger, 2025, &employees(), &types, None).unwrap();
        let second = process_rollover(&mut ledger, 2025, &employees(), &types, None).unwrap();

        assert_eq!(
            second,
            RolloverSummary {
                balances_created: 0,
                carryovers_applied: 0,
                skipped: 1
            }
        );
        let next = ledger.find_balance("emp_001", "annual", 2026).unwrap().unwrap();
        assert_eq!(next.total_days, dec("26"));
        assert_eq!(ledger.store().adjustments().len(), 1);
    }

    #[test]
    fn test_non_carryover_type_gets_fresh_balance() {
        let mut ledger = LeaveLedger::new(InMemoryLeaveStore::new());
        let types = [leave_type("sick", false, None)];

        let summary = process_rollover(&mut ledger, 2025, &employees(), &types, None).unwrap();

        assert_eq!(summary.balances_created, 1);
        assert_eq!(summary.carryovers_applied, 0);
        let next = ledger.find_balance("emp_001", "sick", 2026).unwrap().unwrap();
        assert_eq!(next.total_days, dec("21"));
        assert!(ledger.store().adjustments().is_empty());
    }

    #[test]
    fn test_missing_previous_balance_is_skipped() {
        let mut ledger = LeaveLedger::new(InMemoryLeaveStore::new());
        let types = [leave_type("annual", true, Some("5"))];

        let summary = process_rollover(&mut ledger, 2025, &employees(), &types, None).unwrap();

        assert_eq!(summary.skipped, 1);
        assert!(ledger.find_balance("emp_001", "annual", 2026).unwrap().is_none());
    }

    #[test]
    fn test_overdrawn_balance_carries_nothing() {
        let mut ledger = ledger_with_usage("25");
        let types = [leave_type("annual", true, Some("5"))];

        let summary = process_rollover(&mut ledger, 2025, &employees(), &types, None).unwrap();

        assert_eq!(summary.balances_created, 1);
        assert_eq!(summary.carryovers_applied, 0);
        let next = ledger.find_balance("emp_001", "annual", 2026).unwrap().unwrap();
        assert_eq!(next.total_days, dec("21"));
        assert!(ledger.store().adjustments().is_empty());
    }

    #[test]
    fn test_carryover_days_for_disallowed_type_is_zero() {
        let mut balance = LeaveBalance::new("emp_001", "sick", 2025, dec("21"));
        balance.used_days = dec("3");
        assert_eq!(
            carryover_days(&balance, &leave_type("sick", false, None)),
            Decimal::ZERO
        );
    }
}
