//! Audit and warning models shared by the calculators.
//!
//! [`AuditStep`] records one derivation with its inputs and outputs, the way a
//! reviewer would want to replay it. [`EngineWarning`] carries non-fatal
//! conditions the caller should surface while the operation still completes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in an audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A non-fatal condition produced by a successful operation.
///
/// # Example
///
/// ```
/// use hr_engine::models::EngineWarning;
/// use rust_decimal::Decimal;
///
/// let warning = EngineWarning::NegativeNetPay { net_pay: Decimal::new(-250, 0) };
/// assert_eq!(warning.code(), "NEGATIVE_NET_PAY");
/// assert!(warning.message().contains("-250"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineWarning {
    /// A balance ends up with fewer than zero remaining days.
    NegativeBalance {
        /// The balance concerned.
        balance_id: Uuid,
        /// The employee the balance belongs to.
        employee_id: String,
        /// The leave type of the balance.
        leave_type_id: String,
        /// The balance year.
        year: i32,
        /// Remaining days after the operation.
        remaining_days: Decimal,
    },
    /// Deductions exceed gross pay.
    NegativeNetPay {
        /// The computed net pay.
        net_pay: Decimal,
    },
}

impl EngineWarning {
    /// Returns the machine-readable code of the warning.
    pub fn code(&self) -> &'static str {
        match self {
            EngineWarning::NegativeBalance { .. } => "NEGATIVE_BALANCE",
            EngineWarning::NegativeNetPay { .. } => "NEGATIVE_NET_PAY",
        }
    }

    /// Returns a message suitable for showing to an administrator.
    pub fn message(&self) -> String {
        match self {
            EngineWarning::NegativeBalance {
                employee_id,
                leave_type_id,
                year,
                remaining_days,
                ..
            } => format!(
                "Employee {} will have a negative {} balance for {}: {} days remaining",
                employee_id,
                leave_type_id,
                year,
                remaining_days.normalize()
            ),
            EngineWarning::NegativeNetPay { net_pay } => format!(
                "Deductions exceed gross pay: net pay is {}",
                net_pay.normalize()
            ),
        }
    }
}
