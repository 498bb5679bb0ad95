//! Configuration types for the HR engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DEFAULT_HOLIDAY_SHIFT_LIMIT;
use crate::models::{
    ContributionPolicy, ContributionRates, DEFAULT_EMPLOYEE_CONTRIBUTION_RATE,
    DEFAULT_EMPLOYER_CONTRIBUTION_RATE, LeaveType, WeekendConfig,
};

/// Company-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanySettings {
    /// The company's display name.
    pub name: String,
    /// Weekend days as indices 0 (Sunday) through 6 (Saturday).
    pub weekend_days: WeekendConfig,
    /// How many days a holiday may be shifted looking for a working day.
    #[serde(default = "default_shift_limit")]
    pub holiday_shift_limit: u32,
}

fn default_shift_limit() -> u32 {
    DEFAULT_HOLIDAY_SHIFT_LIMIT
}

/// Statutory contribution settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionConfig {
    /// Whether new offers are subject to the contribution by default.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Employee share as a fraction of basic salary.
    #[serde(default = "default_employee_rate")]
    pub employee_rate: Decimal,
    /// Employer share as a fraction of basic salary.
    #[serde(default = "default_employer_rate")]
    pub employer_rate: Decimal,
}

fn default_true() -> bool {
    true
}

fn default_employee_rate() -> Decimal {
    DEFAULT_EMPLOYEE_CONTRIBUTION_RATE
}

fn default_employer_rate() -> Decimal {
    DEFAULT_EMPLOYER_CONTRIBUTION_RATE
}

impl ContributionConfig {
    /// Returns the configured rates.
    pub fn rates(&self) -> ContributionRates {
        ContributionRates {
            employee_rate: self.employee_rate,
            employer_rate: self.employer_rate,
        }
    }

    /// Returns the policy applied to offers that do not name one.
    pub fn policy(&self) -> ContributionPolicy {
        if self.enabled {
            ContributionPolicy::Rates(self.rates())
        } else {
            ContributionPolicy::Exempt
        }
    }
}

/// Leave types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// The leave type catalogue.
    pub leave_types: Vec<LeaveType>,
}

/// Complete company configuration.
#[derive(Debug, Clone)]
pub struct CompanyConfig {
    company: CompanySettings,
    contribution: ContributionConfig,
    leave_types: Vec<LeaveType>,
}

impl CompanyConfig {
    /// Creates a new company configuration.
    pub fn new(
        company: CompanySettings,
        contribution: ContributionConfig,
        leave_types: Vec<LeaveType>,
    ) -> Self {
        Self {
            company,
            contribution,
            leave_types,
        }
    }

    /// Returns the company settings.
    pub fn company(&self) -> &CompanySettings {
        &self.company
    }

    /// Returns the contribution settings.
    pub fn contribution(&self) -> &ContributionConfig {
        &self.contribution
    }

    /// Returns the leave type catalogue.
    pub fn leave_types(&self) -> &[LeaveType] {
        &self.leave_types
    }
}
