//! Configuration loading and management for the HR engine.
//!
//! This module loads company settings, statutory contribution rates and the
//! leave type catalogue from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded company: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompanyConfig, CompanySettings, ContributionConfig, LeaveTypesConfig};
