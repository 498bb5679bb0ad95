//! Error types for the HR rules engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the ledger, holiday and offer calculators can report.
//! Non-fatal conditions (negative balances, negative net pay) are not errors;
//! they travel on successful results as [`crate::models::EngineWarning`]s.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the HR rules engine.
///
/// All fallible operations in the engine return this error type so callers
/// can pattern-match and render a specific message for each failure.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/company.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/company.yaml");
/// assert_eq!(error.code(), "CONFIG_NOT_FOUND");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Input was rejected before any computation took place.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// A balance already exists for the employee, leave type and year.
    #[error(
        "Leave balance already exists for employee '{employee_id}', leave type '{leave_type_id}' in {year}"
    )]
    DuplicateBalance {
        /// The employee the balance belongs to.
        employee_id: String,
        /// The leave type of the balance.
        leave_type_id: String,
        /// The balance year.
        year: i32,
    },

    /// No balance row exists for the given key.
    #[error("Leave balance not found: {key}")]
    BalanceNotFound {
        /// A description of the key that was looked up.
        key: String,
    },

    /// A leave type id was not present in the catalogue.
    #[error("Leave type not found: {id}")]
    LeaveTypeNotFound {
        /// The leave type id that was not found.
        id: String,
    },

    /// Company configuration makes a computation impossible.
    #[error("Configuration error: {message}")]
    Configuration {
        /// A description of the configuration problem.
        message: String,
    },

    /// The persistence collaborator failed in an unexpected way.
    #[error("Persistence error: {message}")]
    Persistence {
        /// A description of the underlying fault.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a [`EngineError::BalanceNotFound`] error for a balance id.
    pub fn balance_not_found_by_id(id: Uuid) -> Self {
        Self::BalanceNotFound {
            key: format!("id {}", id),
        }
    }

    /// Builds a [`EngineError::BalanceNotFound`] error for an
    /// (employee, leave type, year) key.
    pub fn balance_not_found_for(employee_id: &str, leave_type_id: &str, year: i32) -> Self {
        Self::BalanceNotFound {
            key: format!(
                "employee '{}', leave type '{}', year {}",
                employee_id, leave_type_id, year
            ),
        }
    }

    /// Returns a stable, machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            EngineError::Validation { .. } => "VALIDATION_ERROR",
            EngineError::DuplicateBalance { .. } => "DUPLICATE_BALANCE",
            EngineError::BalanceNotFound { .. } => "BALANCE_NOT_FOUND",
            EngineError::LeaveTypeNotFound { .. } => "LEAVE_TYPE_NOT_FOUND",
            EngineError::Configuration { .. } => "CONFIGURATION_ERROR",
            EngineError::Persistence { .. } => "PERSISTENCE_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
