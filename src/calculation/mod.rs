//! Calculation logic for the PAYE engine.
//!
//! This module contains the calculation functions for determining net pay:
//! salary period normalization, progressive PAYE tax, tiered NSSF
//! contributions, and the aggregation that ties them together.

mod aggregation;
mod contribution;
mod normalization;
mod tax;

pub use aggregation::{PayrollCalculation, calculate_payroll, compute_payroll};
pub use contribution::{
    ContributionResult, ContributionShares, calculate_contribution, compute_contribution,
};
pub use normalization::{
    MONTHS_PER_YEAR, NormalizationResult, normalize_gross, normalize_to_monthly,
};
pub use tax::{PayeResult, calculate_paye, compute_tax, tax_breakdown};

use rust_decimal::Decimal;

/// Renders a fractional rate as a whole-number percentage (0.10 → 10).
pub(crate) fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}
