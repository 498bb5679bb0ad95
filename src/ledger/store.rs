//! The persistence seam of the leave ledger.
//!
//! The ledger never talks to a database itself. It reads and writes rows
//! through a [`LeaveStore`], which the embedding application implements over
//! its relational backend. The store must enforce uniqueness of
//! (employee, leave type, year) and report a violation as
//! [`InsertOutcome::Conflict`] rather than as an error.
//!
//! [`InMemoryLeaveStore`] is a complete implementation used by tests,
//! benchmarks and embedders that keep state in memory.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{BalanceKey, LeaveBalance, LeaveBalanceAdjustment, LeaveRecord};

/// The result of inserting a balance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was written.
    Inserted,
    /// A row with the same (employee, leave type, year) already exists.
    Conflict,
}

/// Read/write access to balance, adjustment and leave rows.
pub trait LeaveStore {
    /// Looks up a balance by id.
    fn get_balance(&self, id: Uuid) -> EngineResult<Option<LeaveBalance>>;

    /// Looks up a balance by its unique key.
    fn find_balance(&self, key: &BalanceKey) -> EngineResult<Option<LeaveBalance>>;

    /// Inserts a new balance, reporting a uniqueness conflict instead of failing.
    fn insert_balance(&mut self, balance: LeaveBalance) -> EngineResult<InsertOutcome>;

    /// Overwrites an existing balance row.
    ///
    /// A row that has vanished since it was read is a `Persistence` error.
    fn update_balance(&mut self, balance: &LeaveBalance) -> EngineResult<()>;

    /// Appends an audit row.
    fn append_adjustment(&mut self, adjustment: LeaveBalanceAdjustment) -> EngineResult<()>;

    /// Returns the audit rows of one balance in insertion order.
    fn adjustments_for(&self, balance_id: Uuid) -> EngineResult<Vec<LeaveBalanceAdjustment>>;

    /// Inserts a leave record.
    fn insert_leave_record(&mut self, record: LeaveRecord) -> EngineResult<()>;
}

/// An in-memory [`LeaveStore`].
///
/// # Example
///
/// ```
/// use hr_engine::ledger::{InMemoryLeaveStore, InsertOutcome, LeaveStore};
/// use hr_engine::models::LeaveBalance;
/// use rust_decimal::Decimal;
///
/// let mut store = InMemoryLeaveStore::new();
/// let balance = LeaveBalance::new("emp_001", "annual", 2026, Decimal::new(21, 0));
/// assert_eq!(store.insert_balance(balance.clone()).unwrap(), InsertOutcome::Inserted);
///
/// let again = LeaveBalance::new("emp_001", "annual", 2026, Decimal::new(30, 0));
/// assert_eq!(store.insert_balance(again).unwrap(), InsertOutcome::Conflict);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaveStore {
    balances: HashMap<Uuid, LeaveBalance>,
    keys: HashMap<BalanceKey, Uuid>,
    adjustments: Vec<LeaveBalanceAdjustment>,
    leave_records: Vec<LeaveRecord>,
}

impl InMemoryLeaveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every balance, ordered by key.
    pub fn balances(&self) -> Vec<LeaveBalance> {
        let mut balances: Vec<LeaveBalance> = self.balances.values().cloned().collect();
        balances.sort_by_key(|b| b.key());
        balances
    }

    /// Returns every audit row in insertion order.
    pub fn adjustments(&self) -> &[LeaveBalanceAdjustment] {
        &self.adjustments
    }

    /// Returns every leave record in insertion order.
    pub fn leave_records(&self) -> &[LeaveRecord] {
        &self.leave_records
    }

    /// Removes a balance row, leaving its audit rows in place.
    pub fn remove_balance(&mut self, id: Uuid) -> Option<LeaveBalance> {
        let removed = self.balances.remove(&id)?;
        self.keys.remove(&removed.key());
        Some(removed)
    }
}

impl LeaveStore for InMemoryLeaveStore {
    fn get_balance(&self, id: Uuid) -> EngineResult<Option<LeaveBalance>> {
        Ok(self.balances.get(&id).cloned())
    }

    fn find_balance(&self, key: &BalanceKey) -> EngineResult<Option<LeaveBalance>> {
        Ok(self
            .keys
            .get(key)
            .and_then(|id| self.balances.get(id))
            .cloned())
    }

    fn insert_balance(&mut self, balance: LeaveBalance) -> EngineResult<InsertOutcome> {
        let key = balance.key();
        if self.keys.contains_key(&key) {
            return Ok(InsertOutcome::Conflict);
        }
        self.keys.insert(key, balance.id);
        self.balances.insert(balance.id, balance);
        Ok(InsertOutcome::Inserted)
    }

    fn update_balance(&mut self, balance: &LeaveBalance) -> EngineResult<()> {
        match self.balances.get_mut(&balance.id) {
            Some(existing) => {
                *existing = balance.clone();
                Ok(())
            }
            None => Err(EngineError::Persistence {
                message: format!("update of missing balance row {}", balance.id),
            }),
        }
    }

    fn append_adjustment(&mut self, adjustment: LeaveBalanceAdjustment) -> EngineResult<()> {
        self.adjustments.push(adjustment);
        Ok(())
    }

    fn adjustments_for(&self, balance_id: Uuid) -> EngineResult<Vec<LeaveBalanceAdjustment>> {
        Ok(self
            .adjustments
            .iter()
            .filter(|a| a.leave_balance_id == balance_id)
            .cloned()
            .collect())
    }

    fn insert_leave_record(&mut self, record: LeaveRecord) -> EngineResult<()> {
        self.leave_records.push(record);
        Ok(())
    }
}
