//! NSSF contribution calculation.
//!
//! ## Tier Rules
//!
//! **Tier 1:** both shares are levied on income capped at the threshold.
//!
//! **Tier 2:**
//! - at or below the threshold, the employee share matches tier 1;
//! - above it, the employee also pays the excess rate on income over the threshold;
//! - the employer share is always levied on full, uncapped income.
//!
//! The employer base differs between tiers. Income equal to the threshold
//! does not exceed it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ContributionScheme;
use crate::models::{AuditStep, ContributionTier};

use super::percent;

/// Employee and employer contribution amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionShares {
    /// Deducted from the employee's pay.
    pub employee: Decimal,
    /// Paid by the employer on top of salary.
    pub employer: Decimal,
}

/// The result of a contribution calculation, including the shares and audit step.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The computed shares.
    pub shares: ContributionShares,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

type ContributionPolicy = fn(Decimal, &ContributionScheme) -> ContributionShares;

fn policy_for(tier: ContributionTier) -> ContributionPolicy {
    match tier {
        ContributionTier::Tier1 => tier1_shares,
        ContributionTier::Tier2 => tier2_shares,
    }
}

fn tier1_shares(income: Decimal, scheme: &ContributionScheme) -> ContributionShares {
    let capped = income.min(scheme.threshold);
    ContributionShares {
        employee: capped * scheme.employee_rate,
        employer: capped * scheme.employer_rate,
    }
}

fn tier2_shares(income: Decimal, scheme: &ContributionScheme) -> ContributionShares {
    let employee = if income > scheme.threshold {
        scheme.threshold * scheme.employee_rate
            + (income - scheme.threshold) * scheme.excess_employee_rate
    } else {
        income * scheme.employee_rate
    };

    ContributionShares {
        employee,
        employer: income * scheme.employer_rate,
    }
}

/// Computes NSSF shares on `taxable_income` for the given tier.
///
/// Negative income is treated as zero.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::compute_contribution;
/// use paye_engine::config::ContributionScheme;
/// use paye_engine::models::ContributionTier;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let scheme = ContributionScheme {
///     reference: "NSSF Act s.12".to_string(),
///     threshold: dec("180000"),
///     employee_rate: dec("0.05"),
///     employer_rate: dec("0.10"),
///     excess_employee_rate: dec("0.10"),
/// };
///
/// let tier1 = compute_contribution(dec("1000000"), ContributionTier::Tier1, &scheme);
/// assert_eq!(tier1.employee, dec("9000"));
/// assert_eq!(tier1.employer, dec("18000"));
///
/// let tier2 = compute_contribution(dec("1000000"), ContributionTier::Tier2, &scheme);
/// assert_eq!(tier2.employee, dec("91000"));
/// assert_eq!(tier2.employer, dec("100000"));
/// ```
pub fn compute_contribution(
    taxable_income: Decimal,
    tier: ContributionTier,
    scheme: &ContributionScheme,
) -> ContributionShares {
    policy_for(tier)(taxable_income.max(Decimal::ZERO), scheme)
}

/// Calculates NSSF shares and records an audit step.
///
/// # Arguments
///
/// * `taxable_income` - Monthly gross plus allowances
/// * `tier` - The tier selected for the employee
/// * `scheme` - The contribution parameters in force
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_contribution(
    taxable_income: Decimal,
    tier: ContributionTier,
    scheme: &ContributionScheme,
    step_number: u32,
) -> ContributionResult {
    let shares = compute_contribution(taxable_income, tier, scheme);
    let exceeds_threshold = taxable_income > scheme.threshold;

    let reasoning = match (tier, exceeds_threshold) {
        (ContributionTier::Tier1, _) => format!(
            "Tier 1: {}% employee and {}% employer on {} (income capped at {}) = {} / {}",
            percent(scheme.employee_rate),
            percent(scheme.employer_rate),
            taxable_income.min(scheme.threshold).max(Decimal::ZERO).normalize(),
            scheme.threshold.normalize(),
            shares.employee.normalize(),
            shares.employer.normalize()
        ),
        (ContributionTier::Tier2, true) => format!(
            "Tier 2: {}% of {} + {}% of excess {} = {} employee; {}% employer on full {} = {}",
            percent(scheme.employee_rate),
            scheme.threshold.normalize(),
            percent(scheme.excess_employee_rate),
            (taxable_income - scheme.threshold).normalize(),
            shares.employee.normalize(),
            percent(scheme.employer_rate),
            taxable_income.normalize(),
            shares.employer.normalize()
        ),
        (ContributionTier::Tier2, false) => format!(
            "Tier 2 at or below threshold {}: {}% employee and {}% employer on {} = {} / {}",
            scheme.threshold.normalize(),
            percent(scheme.employee_rate),
            percent(scheme.employer_rate),
            taxable_income.max(Decimal::ZERO).normalize(),
            shares.employee.normalize(),
            shares.employer.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "nssf_contribution".to_string(),
        rule_name: "NSSF Contribution".to_string(),
        statutory_ref: scheme.reference.clone(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "tier": tier.as_str(),
            "threshold": scheme.threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "employee": shares.employee.normalize().to_string(),
            "employer": shares.employer.normalize().to_string(),
            "exceeds_threshold": exceeds_threshold
        }),
        reasoning,
    };

    ContributionResult { shares, audit_step }
}
