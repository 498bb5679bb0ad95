//! Offer version history.
//!
//! A sent or accepted offer version is never edited. Revising it marks the
//! current version superseded and drafts a new version numbered one higher,
//! copying forward every field the revision does not change. Drafts are
//! still private to HR and are revised in place.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompensationInputs, ContributionPolicy, ContributionRates, OfferChanges, OfferStatus,
    OfferVersion,
};

use super::offer_totals::{OfferTotals, compute_offer_totals};

/// The rows produced by drafting or revising an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRevision {
    /// The previous version with its status set to superseded, when one was replaced.
    pub superseded: Option<OfferVersion>,
    /// The version to persist as current.
    pub current: OfferVersion,
    /// The totals computed for `current`, with warnings and audit steps.
    pub totals: OfferTotals,
}

/// Drafts version 1 of a new offer.
pub fn draft_initial_offer(
    offer_id: Uuid,
    inputs: &CompensationInputs,
    policy: &ContributionPolicy,
) -> EngineResult<OfferRevision> {
    let (current, totals) = build_version(Uuid::new_v4(), offer_id, 1, inputs, policy)?;
    info!(offer_id = %offer_id, net_pay = %current.net_pay_estimate, "Offer drafted");

    Ok(OfferRevision {
        superseded: None,
        current,
        totals,
    })
}

/// Revises an offer version.
///
/// # Arguments
///
/// * `current` - The latest version of the offer
/// * `changes` - Fields to change; unspecified fields are copied forward
/// * `default_rates` - The currently configured rates. A rate-based version
///   revised without naming a policy is recomputed at these rates; exempt and
///   explicit-amount versions keep their policy unchanged
///
/// # Returns
///
/// - For a draft: the same row revised in place
/// - For a sent or accepted version: the superseded row plus a new draft
///   with `version_number + 1`
/// - A `Validation` error for rejected or superseded versions
///
/// # Example
///
/// ```
/// use hr_engine::calculation::{draft_initial_offer, revise_offer};
/// use hr_engine::models::{
///     CompensationInputs, ContributionPolicy, ContributionRates, OfferChanges, OfferStatus,
/// };
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let inputs = CompensationInputs {
///     basic_salary: Decimal::new(5000, 0),
///     ..Default::default()
/// };
/// let policy = ContributionPolicy::Rates(ContributionRates::default());
/// let mut v1 = draft_initial_offer(Uuid::new_v4(), &inputs, &policy).unwrap().current;
/// v1.status = OfferStatus::Sent;
///
/// let changes = OfferChanges {
///     basic_salary: Some(Decimal::new(5500, 0)),
///     ..Default::default()
/// };
/// let revision = revise_offer(&v1, &changes, &ContributionRates::default()).unwrap();
///
/// assert_eq!(revision.superseded.unwrap().status, OfferStatus::Superseded);
/// assert_eq!(revision.current.version_number, 2);
/// assert_eq!(revision.current.basic_salary, Decimal::new(5500, 0));
/// ```
pub fn revise_offer(
    current: &OfferVersion,
    changes: &OfferChanges,
    default_rates: &ContributionRates,
) -> EngineResult<OfferRevision> {
    let inputs = changes.apply_to(&current.inputs());
    let policy = changes.contribution.unwrap_or(match current.contribution {
        ContributionPolicy::Rates(_) => ContributionPolicy::Rates(*default_rates),
        carried => carried,
    });

    match current.status {
        OfferStatus::Draft => {
            let (mut revised, totals) = build_version(
                current.id,
                current.offer_id,
                current.version_number,
                &inputs,
                &policy,
            )?;
            revised.created_at = current.created_at;

            Ok(OfferRevision {
                superseded: None,
                current: revised,
                totals,
            })
        }
        OfferStatus::Sent | OfferStatus::Accepted => {
            let next_number = current.version_number.checked_add(1).ok_or_else(|| {
                EngineError::validation("version_number", "version number overflow")
            })?;
            let (next, totals) =
                build_version(Uuid::new_v4(), current.offer_id, next_number, &inputs, &policy)?;

            let mut superseded = current.clone();
            superseded.status = OfferStatus::Superseded;

            info!(
                offer_id = %current.offer_id,
                superseded_version = current.version_number,
                new_version = next.version_number,
                "Offer version superseded"
            );

            Ok(OfferRevision {
                superseded: Some(superseded),
                current: next,
                totals,
            })
        }
        OfferStatus::Rejected | OfferStatus::Superseded => Err(EngineError::validation(
            "status",
            format!(
                "version {} is {} and can no longer be revised",
                current.version_number, current.status
            ),
        )),
    }
}

fn build_version(
    id: Uuid,
    offer_id: Uuid,
    version_number: u32,
    inputs: &CompensationInputs,
    policy: &ContributionPolicy,
) -> EngineResult<(OfferVersion, OfferTotals)> {
    let totals = compute_offer_totals(inputs, policy)?;

    let version = OfferVersion {
        id,
        offer_id,
        version_number,
        status: OfferStatus::Draft,
        basic_salary: inputs.basic_salary,
        housing_allowance: inputs.housing_allowance,
        transport_allowance: inputs.transport_allowance,
        other_allowances: inputs.other_allowances,
        deductions_fixed: inputs.deductions_fixed,
        is_subject_to_gosi: policy.is_subject(),
        contribution: *policy,
        gosi_employee_amount: totals.employee_contribution,
        gosi_employer_amount: totals.employer_contribution,
        gross_pay_total: totals.gross_pay,
        deductions_total: totals.deductions_total,
        net_pay_estimate: totals.net_pay,
        created_at: Utc::now(),
    };

    Ok((version, totals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_inputs() -> CompensationInputs {
        CompensationInputs {
            basic_salary: dec("5000"),
            housing_allowance: dec("800"),
            transport_allowance: dec("400"),
            other_allowances: dec("0"),
            deductions_fixed: dec("0"),
        }
    }

    fn rates() -> ContributionRates {
        ContributionRates::default()
    }

    fn sent_v1() -> OfferVersion {
        let mut version = draft_initial_offer(
            Uuid::new_v4(),
            &sample_inputs(),
            &ContributionPolicy::Rates(rates()),
        )
        .unwrap()
        .current;
        version.status = OfferStatus::Sent;
        version
    }

    #[test]
    fn test_initial_offer_is_version_one_draft() {
        let revision = draft_initial_offer(
            Uuid::new_v4(),
            &sample_inputs(),
            &ContributionPolicy::Rates(rates()),
        )
        .unwrap();

        assert!(revision.superseded.is_none());
        assert_eq!(revision.current.version_number, 1);
        assert_eq!(revision.current.status, OfferStatus::Draft);
        assert_eq!(revision.current.gross_pay_total, dec("6200"));
        assert_eq!(revision.current.gosi_employee_amount, dec("487.5"));
        assert_eq!(revision.current.net_pay_estimate, dec("5712.5"));
        assert!(revision.current.is_subject_to_gosi);
    }

    #[test]
    fn test_revising_sent_offer_supersedes_it() {
        let v1 = sent_v1();
        let changes = OfferChanges {
            housing_allowance: Some(dec("1000")),
            ..Default::default()
        };

        let revision = revise_offer(&v1, &changes, &rates()).unwrap();
        let superseded = revision.superseded.unwrap();

        assert_eq!(superseded.id, v1.id);
        assert_eq!(superseded.status, OfferStatus::Superseded);
        assert_eq!(superseded.housing_allowance, v1.housing_allowance);

        assert_ne!(revision.current.id, v1.id);
        assert_eq!(revision.current.offer_id, v1.offer_id);
        assert_eq!(revision.current.version_number, 2);
        assert_eq!(revision.current.status, OfferStatus::Draft);
        assert_eq!(revision.current.housing_allowance, dec("1000"));
        assert_eq!(revision.current.basic_salary, dec("5000"));
        assert_eq!(revision.current.gross_pay_total, dec("6400"));
    }

    #[test]
    fn test_revising_accepted_offer_supersedes_it() {
        let mut v1 = sent_v1();
        v1.status = OfferStatus::Accepted;

        let revision = revise_offer(&v1, &OfferChanges::default(), &rates()).unwrap();
        assert!(revision.superseded.is_some());
        assert_eq!(revision.current.version_number, 2);
    }

    #[test]
    fn test_revising_draft_updates_in_place() {
        let draft = draft_initial_offer(
            Uuid::new_v4(),
            &sample_inputs(),
            &ContributionPolicy::Rates(rates()),
        )
        .unwrap()
        .current;

        let changes = OfferChanges {
            basic_salary: Some(dec("6000")),
            ..Default::default()
        };
        let revision = revise_offer(&draft, &changes, &rates()).unwrap();

        assert!(revision.superseded.is_none());
        assert_eq!(revision.current.id, draft.id);
        assert_eq!(revision.current.version_number, 1);
        assert_eq!(revision.current.created_at, draft.created_at);
        assert_eq!(revision.current.gosi_employee_amount, dec("585"));
    }

    #[test]
    fn test_superseded_version_cannot_be_revised() {
        let mut v1 = sent_v1();
        v1.status = OfferStatus::Superseded;

        let result = revise_offer(&v1, &OfferChanges::default(), &rates());
        match result {
            Err(EngineError::Validation { field, message }) => {
                assert_eq!(field, "status");
                assert!(message.contains("superseded"));
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_rejected_version_cannot_be_revised() {
        let mut v1 = sent_v1();
        v1.status = OfferStatus::Rejected;
        assert!(revise_offer(&v1, &OfferChanges::default(), &rates()).is_err());
    }

    #[test]
    fn test_exempt_status_is_copied_forward() {
        let mut v1 = draft_initial_offer(Uuid::new_v4(), &sample_inputs(), &ContributionPolicy::Exempt)
            .unwrap()
            .current;
        v1.status = OfferStatus::Sent;

        let revision = revise_offer(&v1, &OfferChanges::default(), &rates()).unwrap();
        assert!(!revision.current.is_subject_to_gosi);
        assert_eq!(revision.current.gosi_employee_amount, Decimal::ZERO);
        assert_eq!(revision.current.net_pay_estimate, dec("6200"));
    }

    #[test]
    fn test_revision_can_change_contribution_policy() {
        let v1 = sent_v1();
        let changes = OfferChanges {
            contribution: Some(ContributionPolicy::Exempt),
            ..Default::default()
        };

        let revision = revise_offer(&v1, &changes, &rates()).unwrap();
        assert!(!revision.current.is_subject_to_gosi);
        assert_eq!(revision.current.deductions_total, Decimal::ZERO);
    }

    #[test]
    fn test_explicit_amounts_are_copied_forward() {
        let policy = ContributionPolicy::Explicit {
            employee_amount: dec("400"),
            employer_amount: dec("600"),
        };
        let mut v1 = draft_initial_offer(Uuid::new_v4(), &sample_inputs(), &policy)
            .unwrap()
            .current;
        v1.status = OfferStatus::Sent;

        let changes = OfferChanges {
            housing_allowance: Some(dec("1000")),
            ..Default::default()
        };
        let revision = revise_offer(&v1, &changes, &rates()).unwrap();

        assert_eq!(revision.current.contribution, policy);
        assert_eq!(revision.current.gosi_employee_amount, dec("400"));
        assert_eq!(revision.current.gosi_employer_amount, dec("600"));
        assert_eq!(revision.current.net_pay_estimate, dec("6000"));
    }

    #[test]
    fn test_rate_based_version_uses_current_rates() {
        let v1 = sent_v1();
        let updated_rates = ContributionRates {
            employee_rate: dec("0.1"),
            employer_rate: dec("0.12"),
        };

        let revision = revise_offer(&v1, &OfferChanges::default(), &updated_rates).unwrap();

        assert_eq!(
            revision.current.contribution,
            ContributionPolicy::Rates(updated_rates)
        );
        assert_eq!(revision.current.gosi_employee_amount, dec("500"));
    }

    #[test]
    fn test_version_numbers_increase_monotonically() {
        let mut version = sent_v1();
        for expected in 2..=4 {
            let revision = revise_offer(&version, &OfferChanges::default(), &rates()).unwrap();
            assert_eq!(revision.current.version_number, expected);
            version = revision.current;
            version.status = OfferStatus::Sent;
        }
    }
}
