//! Leave balance ledger and year-end rollover.
//!
//! Balances are read and written through the [`LeaveStore`] trait; every
//! change to a balance total leaves an append-only audit row.

mod balance_ledger;
mod rollover;
mod store;

pub use balance_ledger::{
    AdminLeave, AdminLeaveRequest, BalanceAdjustment, BalanceAssignment, BalanceChange, InitializeSummary,
    LeaveLedger,
};
pub use rollover::{RolloverSummary, carryover_days, process_rollover};
pub use store::{InMemoryLeaveStore, InsertOutcome, LeaveStore};
