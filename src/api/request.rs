//! Request types for the PAYE engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/payslip` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::PayForm;

/// Request body for the `/calculate` and `/payslip` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The pay form exactly as entered.
    pub form: PayForm,
    /// Date used to select the statutory schedule. Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    /// Company printed on the payslip. Ignored by `/calculate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl CalculationRequest {
    /// Creates a request for the given form with no date or company override.
    pub fn new(form: PayForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }
}
