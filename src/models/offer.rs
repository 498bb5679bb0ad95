//! Offer and compensation version models.
//!
//! An offer is a chain of [`OfferVersion`] rows. A version is never edited once
//! it has been sent; revising it supersedes it and drafts the next version.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default employee share of the statutory contribution (9.75% of basic).
pub const DEFAULT_EMPLOYEE_CONTRIBUTION_RATE: Decimal = Decimal::from_parts(975, 0, 0, false, 4);

/// Default employer share of the statutory contribution (11.75% of basic).
pub const DEFAULT_EMPLOYER_CONTRIBUTION_RATE: Decimal = Decimal::from_parts(1175, 0, 0, false, 4);

/// Raw monetary inputs of a compensation package.
///
/// # Example
///
/// ```
/// use hr_engine::models::CompensationInputs;
/// use rust_decimal::Decimal;
///
/// let inputs = CompensationInputs {
///     basic_salary: Decimal::new(5000, 0),
///     housing_allowance: Decimal::new(800, 0),
///     transport_allowance: Decimal::new(400, 0),
///     other_allowances: Decimal::ZERO,
///     deductions_fixed: Decimal::ZERO,
/// };
/// assert_eq!(inputs.gross(), Decimal::new(6200, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompensationInputs {
    /// Basic salary; the base for statutory contributions.
    pub basic_salary: Decimal,
    /// Housing allowance.
    #[serde(default)]
    pub housing_allowance: Decimal,
    /// Transport allowance.
    #[serde(default)]
    pub transport_allowance: Decimal,
    /// Any other allowances.
    #[serde(default)]
    pub other_allowances: Decimal,
    /// Fixed deductions other than the statutory contribution.
    #[serde(default)]
    pub deductions_fixed: Decimal,
}

impl CompensationInputs {
    /// Basic salary plus every allowance.
    pub fn gross(&self) -> Decimal {
        self.basic_salary + self.housing_allowance + self.transport_allowance + self.other_allowances
    }
}

/// Percentage-of-basic statutory contribution rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Employee share as a fraction of basic salary.
    pub employee_rate: Decimal,
    /// Employer share as a fraction of basic salary.
    pub employer_rate: Decimal,
}

impl Default for ContributionRates {
    fn default() -> Self {
        Self {
            employee_rate: DEFAULT_EMPLOYEE_CONTRIBUTION_RATE,
            employer_rate: DEFAULT_EMPLOYER_CONTRIBUTION_RATE,
        }
    }
}

/// How the statutory contribution is determined for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ContributionPolicy {
    /// The employee is not subject to the contribution.
    Exempt,
    /// Contributions are a percentage of basic salary.
    Rates(ContributionRates),
    /// The caller supplies the contribution amounts directly.
    Explicit {
        /// Employee contribution amount.
        employee_amount: Decimal,
        /// Employer contribution amount.
        employer_amount: Decimal,
    },
}

impl ContributionPolicy {
    /// Returns true unless the policy is [`ContributionPolicy::Exempt`].
    pub fn is_subject(&self) -> bool {
        !matches!(self, ContributionPolicy::Exempt)
    }
}

/// Lifecycle status of an offer version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Being prepared, still editable in place.
    Draft,
    /// Sent to the candidate.
    Sent,
    /// Accepted by the candidate.
    Accepted,
    /// Declined by the candidate.
    Rejected,
    /// Replaced by a later version.
    Superseded,
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferStatus::Draft => write!(f, "draft"),
            OfferStatus::Sent => write!(f, "sent"),
            OfferStatus::Accepted => write!(f, "accepted"),
            OfferStatus::Rejected => write!(f, "rejected"),
            OfferStatus::Superseded => write!(f, "superseded"),
        }
    }
}

/// One version of an offer's compensation snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferVersion {
    /// Unique identifier of this version row.
    pub id: Uuid,
    /// The offer this version belongs to.
    pub offer_id: Uuid,
    /// 1-based, strictly increasing per offer.
    pub version_number: u32,
    /// Lifecycle status.
    pub status: OfferStatus,
    /// Basic salary.
    pub basic_salary: Decimal,
    /// Housing allowance.
    pub housing_allowance: Decimal,
    /// Transport allowance.
    pub transport_allowance: Decimal,
    /// Other allowances.
    pub other_allowances: Decimal,
    /// Fixed deductions.
    pub deductions_fixed: Decimal,
    /// Whether the statutory contribution applies.
    pub is_subject_to_gosi: bool,
    /// How the contribution amounts were determined.
    pub contribution: ContributionPolicy,
    /// Employee contribution amount.
    pub gosi_employee_amount: Decimal,
    /// Employer contribution amount.
    pub gosi_employer_amount: Decimal,
    /// Derived gross pay.
    pub gross_pay_total: Decimal,
    /// Derived total deductions.
    pub deductions_total: Decimal,
    /// Derived net pay; may be negative.
    pub net_pay_estimate: Decimal,
    /// When the version was created.
    pub created_at: DateTime<Utc>,
}

impl OfferVersion {
    /// Returns the raw monetary inputs of this version.
    pub fn inputs(&self) -> CompensationInputs {
        CompensationInputs {
            basic_salary: self.basic_salary,
            housing_allowance: self.housing_allowance,
            transport_allowance: self.transport_allowance,
            other_allowances: self.other_allowances,
            deductions_fixed: self.deductions_fixed,
        }
    }
}

/// Field changes for an offer revision. `None` keeps the previous value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OfferChanges {
    /// New basic salary.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
    /// New housing allowance.
    #[serde(default)]
    pub housing_allowance: Option<Decimal>,
    /// New transport allowance.
    #[serde(default)]
    pub transport_allowance: Option<Decimal>,
    /// New other allowances.
    #[serde(default)]
    pub other_allowances: Option<Decimal>,
    /// New fixed deductions.
    #[serde(default)]
    pub deductions_fixed: Option<Decimal>,
    /// New contribution policy.
    #[serde(default)]
    pub contribution: Option<ContributionPolicy>,
}

impl OfferChanges {
    /// Applies the changes over a previous set of inputs.
    pub fn apply_to(&self, previous: &CompensationInputs) -> CompensationInputs {
        CompensationInputs {
            basic_salary: self.basic_salary.unwrap_or(previous.basic_salary),
            housing_allowance: self.housing_allowance.unwrap_or(previous.housing_allowance),
            transport_allowance: self
                .transport_allowance
                .unwrap_or(previous.transport_allowance),
            other_allowances: self.other_allowances.unwrap_or(previous.other_allowances),
            deductions_fixed: self.deductions_fixed.unwrap_or(previous.deductions_fixed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_rates_are_exact() {
        assert_eq!(DEFAULT_EMPLOYEE_CONTRIBUTION_RATE, dec("0.0975"));
        assert_eq!(DEFAULT_EMPLOYER_CONTRIBUTION_RATE, dec("0.1175"));
        assert_eq!(
            ContributionRates::default().employee_rate,
            DEFAULT_EMPLOYEE_CONTRIBUTION_RATE
        );
    }

    #[test]
    fn test_changes_copy_forward_unspecified_fields() {
        let previous = CompensationInputs {
            basic_salary: dec("5000"),
            housing_allowance: dec("800"),
            transport_allowance: dec("400"),
            other_allowances: dec("0"),
            deductions_fixed: dec("100"),
        };
        let changes = OfferChanges {
            basic_salary: Some(dec("5500")),
            ..Default::default()
        };

        let next = changes.apply_to(&previous);
        assert_eq!(next.basic_salary, dec("5500"));
        assert_eq!(next.housing_allowance, dec("800"));
        assert_eq!(next.deductions_fixed, dec("100"));
    }

    #[test]
    fn test_contribution_policy_serialization() {
        let json = serde_json::to_string(&ContributionPolicy::Exempt).unwrap();
        assert_eq!(json, "{\"mode\":\"exempt\"}");

        let policy: ContributionPolicy = serde_json::from_str(
            r#"{"mode": "explicit", "employee_amount": "400", "employer_amount": "500"}"#,
        )
        .unwrap();
        assert_eq!(
            policy,
            ContributionPolicy::Explicit {
                employee_amount: dec("400"),
                employer_amount: dec("500"),
            }
        );
        assert!(policy.is_subject());
    }

    #[test]
    fn test_rates_policy_deserialization() {
        let policy: ContributionPolicy = serde_json::from_str(
            r#"{"mode": "rates", "employee_rate": "0.1", "employer_rate": "0.12"}"#,
        )
        .unwrap();
        assert_eq!(
            policy,
            ContributionPolicy::Rates(ContributionRates {
                employee_rate: dec("0.1"),
                employer_rate: dec("0.12"),
            })
        );
    }

    #[test]
    fn test_offer_status_serialization() {
        assert_eq!(
            serde_json::to_string(&OfferStatus::Superseded).unwrap(),
            "\"superseded\""
        );
        assert_eq!(OfferStatus::Sent.to_string(), "sent");
    }
}
