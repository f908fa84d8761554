//! Configuration types for payroll schedules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TaxBands;

/// Metadata about the jurisdiction the schedules belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short jurisdiction code (e.g., "UG").
    pub code: String,
    /// Human-readable name of the rule set.
    pub name: String,
    /// ISO 4217 code every amount is expressed in.
    pub currency: String,
    /// The version of the configuration.
    pub version: String,
    /// URL to the official guidance.
    pub source_url: String,
}

/// Parameters of the two-tier NSSF contribution scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionScheme {
    /// Reference to the statute defining the scheme.
    #[serde(default = "default_contribution_reference")]
    pub reference: String,
    /// Income level at which the first tier ends.
    pub threshold: Decimal,
    /// Employee rate on income up to the threshold.
    pub employee_rate: Decimal,
    /// Employer rate.
    pub employer_rate: Decimal,
    /// Additional employee rate on income above the threshold (tier 2 only).
    pub excess_employee_rate: Decimal,
}

fn default_contribution_reference() -> String {
    "NSSF".to_string()
}

fn default_tax_reference() -> String {
    "PAYE".to_string()
}

impl ContributionScheme {
    /// Checks that the threshold is non-negative and every rate lies in `[0, 1]`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.threshold < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "contributions.threshold".to_string(),
                message: format!("must not be negative (got {})", self.threshold),
            });
        }

        let rates = [
            ("contributions.employee_rate", self.employee_rate),
            ("contributions.employer_rate", self.employer_rate),
            ("contributions.excess_employee_rate", self.excess_employee_rate),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("rate {} is outside [0, 1]", rate),
                });
            }
        }

        Ok(())
    }
}

/// The statutory rates effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSchedule {
    /// The date these rates take effect.
    pub effective_date: NaiveDate,
    /// Reference to the statute defining the tax bands.
    #[serde(default = "default_tax_reference")]
    pub tax_reference: String,
    /// Monthly PAYE bands.
    pub tax_bands: TaxBands,
    /// NSSF contribution parameters.
    pub contributions: ContributionScheme,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Schedules by effective date (sorted oldest first).
    schedules: Vec<PayrollSchedule>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: JurisdictionMetadata, schedules: Vec<PayrollSchedule>) -> Self {
        let mut sorted_schedules = schedules;
        sorted_schedules.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            schedules: sorted_schedules,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all schedules, oldest first.
    pub fn schedules(&self) -> &[PayrollSchedule] {
        &self.schedules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scheme() -> ContributionScheme {
        ContributionScheme {
            reference: "NSSF Act s.12".to_string(),
            threshold: dec("180000"),
            employee_rate: dec("0.05"),
            employer_rate: dec("0.10"),
            excess_employee_rate: dec("0.10"),
        }
    }

    #[test]
    fn test_valid_scheme_passes() {
        assert!(scheme().validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_fails() {
        let mut scheme = scheme();
        scheme.threshold = dec("-1");
        assert!(scheme.validate().is_err());
    }

    #[test]
    fn test_rate_above_one_fails() {
        let mut scheme = scheme();
        scheme.employer_rate = dec("1.01");
        match scheme.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "contributions.employer_rate")
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_schedule_deserializes_with_default_references() {
        let yaml = r#"
effective_date: 2023-07-01
tax_bands:
  - upper_bound: "235000"
    rate: "0"
  - upper_bound: null
    rate: "0.3"
contributions:
  threshold: "180000"
  employee_rate: "0.05"
  employer_rate: "0.10"
  excess_employee_rate: "0.10"
"#;
        let schedule: PayrollSchedule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            schedule.effective_date,
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()
        );
        assert_eq!(schedule.tax_reference, "PAYE");
        assert_eq!(schedule.contributions.reference, "NSSF");
        assert_eq!(schedule.tax_bands.len(), 2);
    }
}
