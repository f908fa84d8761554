//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionMetadata, PayrollConfig, PayrollSchedule};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and resolves which statutory schedule applies on a given date.
///
/// # Directory Structure
///
/// ```text
/// config/ug_paye/
/// ├── jurisdiction.yaml    # Jurisdiction metadata and currency
/// └── schedules/
///     └── 2023-07-01.yaml  # Tax bands and NSSF rules effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use paye_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ug_paye")?;
/// let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let schedule = loader.get_schedule(date)?;
/// println!("{} bands in force", schedule.tax_bands.len());
/// # Ok::<(), paye_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or describes a tax band table or contribution scheme that breaks
    /// its invariants.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let jurisdiction_path = path.join("jurisdiction.yaml");
        let metadata = Self::load_yaml::<JurisdictionMetadata>(&jurisdiction_path)?;

        let schedules_dir = path.join("schedules");
        let schedules = Self::load_schedules(&schedules_dir)?;

        debug!(
            jurisdiction = %metadata.code,
            schedules = schedules.len(),
            "Loaded payroll configuration"
        );

        Ok(Self::from_config(PayrollConfig::new(metadata, schedules)))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
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

    /// Loads all schedule files from the schedules directory.
    fn load_schedules(schedules_dir: &Path) -> EngineResult<Vec<PayrollSchedule>> {
        let schedules_dir_str = schedules_dir.display().to_string();

        let entries = fs::read_dir(schedules_dir).map_err(|_| EngineError::ConfigNotFound {
            path: schedules_dir_str.clone(),
        })?;

        let mut schedules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: schedules_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let schedule = Self::load_yaml::<PayrollSchedule>(&path)?;
                schedule
                    .contributions
                    .validate()
                    .map_err(|e| EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?;
                schedules.push(schedule);
            }
        }

        if schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no schedule files found)", schedules_dir_str),
            });
        }

        Ok(schedules)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Returns the currency code amounts are expressed in.
    pub fn currency(&self) -> &str {
        &self.config.jurisdiction().currency
    }

    /// Gets the schedule in force on a given date.
    ///
    /// The most recent schedule effective on or before `date` is returned.
    pub fn get_schedule(&self, date: NaiveDate) -> EngineResult<&PayrollSchedule> {
        let schedule = self
            .config
            .schedules()
            .iter()
            .rev()
            .find(|s| s.effective_date <= date)
            .ok_or(EngineError::ScheduleNotFound { date })?;

        debug!(
            requested = %date,
            effective_date = %schedule.effective_date,
            "Resolved payroll schedule"
        );
        Ok(schedule)
    }

    /// Returns the newest schedule regardless of date.
    pub fn latest_schedule(&self) -> Option<&PayrollSchedule> {
        self.config.schedules().last()
    }
}
