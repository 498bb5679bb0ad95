//! Offer and payroll monetary totals.
//!
//! Derives gross pay, statutory contributions, total deductions and net pay
//! from a compensation package's raw inputs.
//!
//! ## Formulae
//!
//! - `gross = basic + housing + transport + other`
//! - `employee_contribution = basic × employee_rate` (or an explicit amount)
//! - `employer_contribution = basic × employer_rate` (or an explicit amount)
//! - `deductions_total = deductions_fixed + employee_contribution`
//! - `net_pay = gross - deductions_total`
//!
//! Amounts are kept exact. Net pay is never clamped; a negative result is
//! returned with a warning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CompensationInputs, ContributionPolicy, EngineWarning};

/// The derived totals of a compensation package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTotals {
    /// Basic salary plus all allowances.
    pub gross_pay: Decimal,
    /// Employee share of the statutory contribution.
    pub employee_contribution: Decimal,
    /// Employer share of the statutory contribution.
    pub employer_contribution: Decimal,
    /// Fixed deductions plus the employee contribution.
    pub deductions_total: Decimal,
    /// Gross pay minus total deductions; may be negative.
    pub net_pay: Decimal,
    /// Non-fatal conditions, such as a negative net pay.
    pub warnings: Vec<EngineWarning>,
    /// Audit steps recording each derivation.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the totals of a compensation package.
///
/// # Arguments
///
/// * `inputs` - The raw monetary inputs
/// * `policy` - How the statutory contribution is determined
///
/// # Returns
///
/// The derived [`OfferTotals`], or a `Validation` error if any input amount
/// or rate is negative.
///
/// # Example
///
/// ```
/// use hr_engine::calculation::compute_offer_totals;
/// use hr_engine::models::{CompensationInputs, ContributionPolicy, ContributionRates};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let inputs = CompensationInputs {
///     basic_salary: Decimal::from_str("5000").unwrap(),
///     housing_allowance: Decimal::from_str("800").unwrap(),
///     transport_allowance: Decimal::from_str("400").unwrap(),
///     other_allowances: Decimal::ZERO,
///     deductions_fixed: Decimal::ZERO,
/// };
///
/// let totals = compute_offer_totals(&inputs, &ContributionPolicy::Rates(ContributionRates::default())).unwrap();
/// assert_eq!(totals.gross_pay, Decimal::from_str("6200").unwrap());
/// assert_eq!(totals.employee_contribution, Decimal::from_str("487.5").unwrap());
/// assert_eq!(totals.net_pay, Decimal::from_str("5712.5").unwrap());
/// ```
pub fn compute_offer_totals(
    inputs: &CompensationInputs,
    policy: &ContributionPolicy,
) -> EngineResult<OfferTotals> {
    validate_inputs(inputs, policy)?;

    let gross_pay = inputs.gross();
    let gross_step = AuditStep {
        step_number: 1,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "basic_salary": inputs.basic_salary.normalize().to_string(),
            "housing_allowance": inputs.housing_allowance.normalize().to_string(),
            "transport_allowance": inputs.transport_allowance.normalize().to_string(),
            "other_allowances": inputs.other_allowances.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} + {} + {} + {} = {}",
            inputs.basic_salary.normalize(),
            inputs.housing_allowance.normalize(),
            inputs.transport_allowance.normalize(),
            inputs.other_allowances.normalize(),
            gross_pay.normalize()
        ),
    };

    let (employee_contribution, employer_contribution, contribution_reasoning) = match policy {
        ContributionPolicy::Exempt => (
            Decimal::ZERO,
            Decimal::ZERO,
            "Not subject to statutory contribution".to_string(),
        ),
        ContributionPolicy::Rates(rates) => {
            let employee = inputs.basic_salary * rates.employee_rate;
            let employer = inputs.basic_salary * rates.employer_rate;
            (
                employee,
                employer,
                format!(
                    "{} x {} = {} (employee), {} x {} = {} (employer)",
                    inputs.basic_salary.normalize(),
                    rates.employee_rate.normalize(),
                    employee.normalize(),
                    inputs.basic_salary.normalize(),
                    rates.employer_rate.normalize(),
                    employer.normalize()
                ),
            )
        }
        ContributionPolicy::Explicit {
            employee_amount,
            employer_amount,
        } => (
            *employee_amount,
            *employer_amount,
            format!(
                "Explicit amounts: {} (employee), {} (employer)",
                employee_amount.normalize(),
                employer_amount.normalize()
            ),
        ),
    };
    let contribution_step = AuditStep {
        step_number: 2,
        rule_id: "statutory_contribution".to_string(),
        rule_name: "Statutory Contribution".to_string(),
        input: serde_json::json!({
            "basic_salary": inputs.basic_salary.normalize().to_string(),
            "is_subject": policy.is_subject()
        }),
        output: serde_json::json!({
            "employee_contribution": employee_contribution.normalize().to_string(),
            "employer_contribution": employer_contribution.normalize().to_string()
        }),
        reasoning: contribution_reasoning,
    };

    let deductions_total = inputs.deductions_fixed + employee_contribution;
    let net_pay = gross_pay - deductions_total;
    let net_step = AuditStep {
        step_number: 3,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "deductions_fixed": inputs.deductions_fixed.normalize().to_string(),
            "employee_contribution": employee_contribution.normalize().to_string()
        }),
        output: serde_json::json!({
            "deductions_total": deductions_total.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} - ({} + {}) = {}",
            gross_pay.normalize(),
            inputs.deductions_fixed.normalize(),
            employee_contribution.normalize(),
            net_pay.normalize()
        ),
    };

    let mut warnings = Vec::new();
    if net_pay < Decimal::ZERO {
        warn!(net_pay = %net_pay, gross_pay = %gross_pay, "Deductions exceed gross pay");
        warnings.push(EngineWarning::NegativeNetPay { net_pay });
    }

    Ok(OfferTotals {
        gross_pay,
        employee_contribution,
        employer_contribution,
        deductions_total,
        net_pay,
        warnings,
        audit_steps: vec![gross_step, contribution_step, net_step],
    })
}

fn validate_inputs(inputs: &CompensationInputs, policy: &ContributionPolicy) -> EngineResult<()> {
    let mut amounts = vec![
        ("basic_salary", inputs.basic_salary),
        ("housing_allowance", inputs.housing_allowance),
        ("transport_allowance", inputs.transport_allowance),
        ("other_allowances", inputs.other_allowances),
        ("deductions_fixed", inputs.deductions_fixed),
    ];
    match policy {
        ContributionPolicy::Exempt => {}
        ContributionPolicy::Rates(rates) => {
            amounts.push(("employee_rate", rates.employee_rate));
            amounts.push(("employer_rate", rates.employer_rate));
        }
        ContributionPolicy::Explicit {
            employee_amount,
            employer_amount,
        } => {
            amounts.push(("gosi_employee_amount", *employee_amount));
            amounts.push(("gosi_employer_amount", *employer_amount));
        }
    }

    match amounts.into_iter().find(|(_, value)| *value < Decimal::ZERO) {
        Some((field, value)) => Err(EngineError::validation(
            field,
            format!("must not be negative, got {}", value),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContributionRates;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn inputs(basic: &str, housing: &str, transport: &str, other: &str, fixed: &str) -> CompensationInputs {
        CompensationInputs {
            basic_salary: dec(basic),
            housing_allowance: dec(housing),
            transport_allowance: dec(transport),
            other_allowances: dec(other),
            deductions_fixed: dec(fixed),
        }
    }

    fn default_rates() -> ContributionPolicy {
        ContributionPolicy::Rates(ContributionRates::default())
    }

    /// OT-001: standard package subject to contribution
    #[test]
    fn test_standard_package_with_contribution() {
        let totals = compute_offer_totals(&inputs("5000", "800", "400", "0", "0"), &default_rates()).unwrap();

        assert_eq!(totals.gross_pay, dec("6200"));
        assert_eq!(totals.employee_contribution, dec("487.5"));
        assert_eq!(totals.employer_contribution, dec("587.5"));
        assert_eq!(totals.deductions_total, dec("487.5"));
        assert_eq!(totals.net_pay, dec("5712.5"));
        assert!(totals.warnings.is_empty());
    }

    /// OT-002: exempt package has no contribution
    #[test]
    fn test_exempt_package() {
        let totals = compute_offer_totals(
            &inputs("5000", "800", "400", "0", "150"),
            &ContributionPolicy::Exempt,
        )
        .unwrap();

        assert_eq!(totals.employee_contribution, Decimal::ZERO);
        assert_eq!(totals.employer_contribution, Decimal::ZERO);
        assert_eq!(totals.deductions_total, dec("150"));
        assert_eq!(totals.net_pay, dec("6050"));
    }

    /// OT-003: explicit amounts override the rate
    #[test]
    fn test_explicit_contribution_amounts() {
        let totals = compute_offer_totals(
            &inputs("5000", "0", "0", "0", "0"),
            &ContributionPolicy::Explicit {
                employee_amount: dec("400"),
                employer_amount: dec("600"),
            },
        )
        .unwrap();

        assert_eq!(totals.employee_contribution, dec("400"));
        assert_eq!(totals.employer_contribution, dec("600"));
        assert_eq!(totals.net_pay, dec("4600"));
    }

    /// OT-004: negative net pay is returned with a warning
    #[test]
    fn test_negative_net_pay_is_surfaced() {
        let totals = compute_offer_totals(
            &inputs("1000", "0", "0", "0", "1200"),
            &ContributionPolicy::Exempt,
        )
        .unwrap();

        assert_eq!(totals.net_pay, dec("-200"));
        assert_eq!(
            totals.warnings,
            vec![EngineWarning::NegativeNetPay { net_pay: dec("-200") }]
        );
    }

    #[test]
    fn test_negative_input_is_rejected() {
        let result = compute_offer_totals(
            &inputs("5000", "-1", "0", "0", "0"),
            &ContributionPolicy::Exempt,
        );
        match result {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "housing_allowance"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_negative_explicit_amount_is_rejected() {
        let result = compute_offer_totals(
            &inputs("5000", "0", "0", "0", "0"),
            &ContributionPolicy::Explicit {
                employee_amount: dec("-5"),
                employer_amount: dec("0"),
            },
        );
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_totals_invariants_hold() {
        let totals =
            compute_offer_totals(&inputs("7321.45", "1200", "350.55", "99.99", "42.10"), &default_rates())
                .unwrap();

        assert_eq!(
            totals.deductions_total,
            dec("42.10") + totals.employee_contribution
        );
        assert_eq!(totals.net_pay, totals.gross_pay - totals.deductions_total);
    }

    #[test]
    fn test_audit_steps_are_sequenced() {
        let totals = compute_offer_totals(&inputs("5000", "800", "400", "0", "0"), &default_rates()).unwrap();

        let ids: Vec<&str> = totals.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["gross_pay", "statutory_contribution", "net_pay"]);
        assert_eq!(totals.audit_steps[0].reasoning, "5000 + 800 + 400 + 0 = 6200");
        assert_eq!(
            totals.audit_steps[1].output["employee_contribution"]
                .as_str()
                .unwrap(),
            "487.5"
        );
        assert_eq!(totals.audit_steps[2].output["net_pay"].as_str().unwrap(), "5712.5");
    }
}
