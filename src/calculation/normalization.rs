//! Salary period normalization.
//!
//! Every downstream figure is monthly, so an annual gross salary is spread
//! evenly over twelve months before anything else is computed.

use rust_decimal::Decimal;

use crate::models::{AuditStep, SalaryPeriod};

/// Number of pay months in a year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of normalizing a gross salary, including the audit step.
#[derive(Debug, Clone)]
pub struct NormalizationResult {
    /// Gross salary as a monthly amount.
    pub gross_monthly: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Converts `amount` quoted for `period` into a monthly amount.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::normalize_to_monthly;
/// use paye_engine::models::SalaryPeriod;
/// use rust_decimal::Decimal;
///
/// let monthly = normalize_to_monthly(Decimal::from(12_000_000), SalaryPeriod::Annual);
/// assert_eq!(monthly, Decimal::from(1_000_000));
/// ```
pub fn normalize_to_monthly(amount: Decimal, period: SalaryPeriod) -> Decimal {
    match period {
        SalaryPeriod::Monthly => amount,
        SalaryPeriod::Annual => amount / MONTHS_PER_YEAR,
    }
}

/// Normalizes a gross salary and records an audit step.
pub fn normalize_gross(
    gross_salary: Decimal,
    period: SalaryPeriod,
    step_number: u32,
) -> NormalizationResult {
    let gross_monthly = normalize_to_monthly(gross_salary, period);

    let reasoning = match period {
        SalaryPeriod::Monthly => format!(
            "Gross salary {} is already monthly",
            gross_salary.normalize()
        ),
        SalaryPeriod::Annual => format!(
            "Annual gross {} / {} = {} per month",
            gross_salary.normalize(),
            MONTHS_PER_YEAR,
            gross_monthly.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_normalization".to_string(),
        rule_name: "Salary Period Normalization".to_string(),
        statutory_ref: "payroll".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "period": period.as_str()
        }),
        output: serde_json::json!({
            "gross_monthly": gross_monthly.normalize().to_string()
        }),
        reasoning,
    };

    NormalizationResult {
        gross_monthly,
        audit_step,
    }
}
