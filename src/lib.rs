//! HR Engine for leave balances, public holidays and offer packages
//!
//! This crate provides the business rules behind an HR administration
//! service: weekend-aware date utilities, public holiday compensation, a
//! leave balance ledger with an append-only audit trail, year-end rollover
//! with capped carryover, and offer monetary totals with version history.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
