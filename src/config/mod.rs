//! Configuration loading and management for the PAYE engine.
//!
//! This module provides functionality to load payroll configurations from YAML
//! files: jurisdiction metadata plus one statutory schedule (tax bands and
//! NSSF contribution rules) per effective date.
//!
//! # Example
//!
//! ```no_run
//! use paye_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ug_paye").unwrap();
//! println!("Loaded rules: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ContributionScheme, JurisdictionMetadata, PayrollConfig, PayrollSchedule};
