//! Core data models for the PAYE engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod pay_input;
mod tax_band;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BandTax, CalculationResult, PayResult,
};
pub use employee::EmployeeDetails;
pub use pay_input::{Allowances, ContributionTier, OtherDeductions, PayInput, SalaryPeriod};
pub(crate) use pay_input::checked_sum;
pub use tax_band::{BandSegment, TaxBand, TaxBands};
