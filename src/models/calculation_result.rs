//! Calculation result models for the PAYE engine.
//!
//! This module contains the bare [`PayResult`] produced by the calculator and
//! the [`CalculationResult`] envelope returned to callers, which adds the
//! per-band tax breakdown, identity fields and a complete audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ContributionTier, EmployeeDetails};

/// The derived figures of one payroll calculation, all monthly amounts.
///
/// Values are raw decimals; no rounding or currency formatting is applied.
///
/// # Example
///
/// ```
/// use paye_engine::models::PayResult;
/// use rust_decimal::Decimal;
///
/// let result = PayResult {
///     gross_monthly: Decimal::from(1_000_000),
///     total_allowances: Decimal::ZERO,
///     taxable_income: Decimal::from(1_000_000),
///     tax: Decimal::from(202_000),
///     employee_contribution: Decimal::from(9_000),
///     employer_contribution: Decimal::from(18_000),
///     total_other_deductions: Decimal::ZERO,
///     total_deductions: Decimal::from(211_000),
///     net_pay: Decimal::from(789_000),
/// };
/// assert!(result.is_consistent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResult {
    /// Gross salary normalized to a monthly amount.
    pub gross_monthly: Decimal,
    /// Sum of all allowances.
    pub total_allowances: Decimal,
    /// Gross monthly plus allowances.
    pub taxable_income: Decimal,
    /// PAYE income tax due.
    pub tax: Decimal,
    /// Employee NSSF share, deducted from pay.
    pub employee_contribution: Decimal,
    /// Employer NSSF share, paid on top of salary.
    pub employer_contribution: Decimal,
    /// Loan plus savings deductions.
    pub total_other_deductions: Decimal,
    /// Tax plus employee contribution plus other deductions.
    pub total_deductions: Decimal,
    /// Take-home pay. May be negative when deductions exceed earnings.
    pub net_pay: Decimal,
}

impl PayResult {
    /// Checks the accounting identities that tie the figures together.
    pub fn is_consistent(&self) -> bool {
        let deductions = self
            .tax
            .checked_add(self.employee_contribution)
            .and_then(|sum| sum.checked_add(self.total_other_deductions));

        self.gross_monthly.checked_add(self.total_allowances) == Some(self.taxable_income)
            && deductions == Some(self.total_deductions)
            && self.taxable_income.checked_sub(self.total_deductions) == Some(self.net_pay)
    }
}

/// Tax levied within one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTax {
    /// Exclusive lower edge of the band.
    pub lower: Decimal,
    /// Inclusive upper edge; `None` for the top band.
    pub upper: Option<Decimal>,
    /// Marginal rate of the band.
    pub rate: Decimal,
    /// Portion of taxable income falling inside the band.
    pub taxed_amount: Decimal,
    /// `taxed_amount * rate`.
    pub tax: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute or schedule for this rule.
    pub statutory_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are computed as-is but may need attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payroll calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Effective date of the schedule the figures were computed under.
    pub schedule_effective_date: NaiveDate,
    /// ISO currency code of every amount.
    pub currency: String,
    /// Identity of the employee the calculation is for.
    pub employee: EmployeeDetails,
    /// NSSF tier the contributions were computed under.
    pub contribution_tier: ContributionTier,
    /// The computed pay figures.
    pub pay: PayResult,
    /// PAYE levied per band.
    pub tax_breakdown: Vec<BandTax>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
