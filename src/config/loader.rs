//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{ContributionPolicy, ContributionRates, LeaveType, WeekendConfig};

use super::types::{
    CompanyConfig, CompanySettings, ContributionConfig, LeaveTypesConfig,
};

/// Loads and provides access to company configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── company.yaml       # Name, weekend days, holiday shift limit
/// ├── contribution.yaml  # Statutory contribution rates
/// └── leave_types.yaml   # Leave type catalogue
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let annual = loader.get_leave_type("annual").unwrap();
/// println!("{} days of {}", annual.default_allocation(), annual.name);
/// println!("Weekend days: {:?}", loader.weekend().indices());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CompanyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or an out-of-range weekday (`ConfigParseError`)
    /// - Two leave types share an id (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanySettings>(&path.join("company.yaml"))?;
        let contribution = Self::load_yaml::<ContributionConfig>(&path.join("contribution.yaml"))?;

        let leave_types_path = path.join("leave_types.yaml");
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&leave_types_path)?.leave_types;
        Self::check_unique_ids(&leave_types, &leave_types_path)?;

        info!(
            company = %company.name,
            leave_types = leave_types.len(),
            "Company configuration loaded"
        );

        Ok(Self {
            config: CompanyConfig::new(company, contribution, leave_types),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_unique_ids(leave_types: &[LeaveType], path: &Path) -> EngineResult<()> {
        for (index, leave_type) in leave_types.iter().enumerate() {
            if leave_types[..index].iter().any(|t| t.id == leave_type.id) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate leave type id '{}'", leave_type.id),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying company configuration.
    pub fn config(&self) -> &CompanyConfig {
        &self.config
    }

    /// Returns the company settings.
    pub fn company(&self) -> &CompanySettings {
        self.config.company()
    }

    /// Returns the configured weekend days.
    pub fn weekend(&self) -> &WeekendConfig {
        &self.config.company().weekend_days
    }

    /// Returns how many days a holiday may be shifted.
    pub fn holiday_shift_limit(&self) -> u32 {
        self.config.company().holiday_shift_limit
    }

    /// Returns the configured contribution rates.
    pub fn contribution_rates(&self) -> ContributionRates {
        self.config.contribution().rates()
    }

    /// Returns the contribution policy for offers that do not name one.
    pub fn contribution_policy(&self) -> ContributionPolicy {
        self.config.contribution().policy()
    }

    /// Returns the leave type catalogue.
    pub fn leave_types(&self) -> &[LeaveType] {
        self.config.leave_types()
    }

    /// Gets a leave type by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hr_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let sick = loader.get_leave_type("sick")?;
    /// println!("Sick leave carries over: {}", sick.allow_carryover);
    /// # Ok::<(), hr_engine::error::EngineError>(())
    /// ```
    pub fn get_leave_type(&self, id: &str) -> EngineResult<&LeaveType> {
        self.config
            .leave_types()
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::LeaveTypeNotFound { id: id.to_string() })
    }
}
