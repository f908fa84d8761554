//! Pay input models.
//!
//! This module contains [`PayInput`], the numeric record the calculator
//! consumes, together with its period, allowance, deduction and contribution
//! tier components.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The period a gross salary figure is quoted for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryPeriod {
    /// Gross salary is a monthly amount.
    #[default]
    Monthly,
    /// Gross salary is an annual amount and is spread over twelve months.
    Annual,
}

impl SalaryPeriod {
    /// Returns the wire name of the period.
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryPeriod::Monthly => "monthly",
            SalaryPeriod::Annual => "annual",
        }
    }
}

impl fmt::Display for SalaryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalaryPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(SalaryPeriod::Monthly),
            "annual" | "annually" | "yearly" => Ok(SalaryPeriod::Annual),
            other => Err(EngineError::InvalidInput {
                field: "salary_period".to_string(),
                message: format!("unknown salary period '{}'", other),
            }),
        }
    }
}

/// The NSSF contribution tier selected for the employee.
///
/// # Example
///
/// ```
/// use paye_engine::models::ContributionTier;
///
/// let tier: ContributionTier = "tier2".parse().unwrap();
/// assert_eq!(tier, ContributionTier::Tier2);
/// assert_eq!(serde_json::to_string(&tier).unwrap(), "\"tier2\"");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionTier {
    /// Both shares are levied on income capped at the threshold.
    #[default]
    Tier1,
    /// Employee pays an extra rate on income above the threshold; the
    /// employer share is levied on full income.
    Tier2,
}

impl ContributionTier {
    /// Returns the wire name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionTier::Tier1 => "tier1",
            ContributionTier::Tier2 => "tier2",
        }
    }
}

impl fmt::Display for ContributionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionTier {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "tier1" | "tieri" => Ok(ContributionTier::Tier1),
            "tier2" | "tierii" => Ok(ContributionTier::Tier2),
            _ => Err(EngineError::InvalidInput {
                field: "contribution_tier".to_string(),
                message: format!("unknown contribution tier '{}'", s.trim()),
            }),
        }
    }
}

/// Monthly allowances paid on top of gross salary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowances {
    /// Housing allowance.
    #[serde(default)]
    pub housing: Decimal,
    /// Transport allowance.
    #[serde(default)]
    pub transport: Decimal,
    /// Medical allowance.
    #[serde(default)]
    pub medical: Decimal,
    /// Any other allowance.
    #[serde(default)]
    pub other: Decimal,
}

impl Allowances {
    /// Sum of all allowances.
    ///
    /// Fails when the sum does not fit in a `Decimal`.
    pub fn total(&self) -> EngineResult<Decimal> {
        checked_sum(
            "allowances",
            &[self.housing, self.transport, self.medical, self.other],
        )
    }

    /// Returns a copy with every negative amount raised to zero.
    pub fn clamped(&self) -> Self {
        Self {
            housing: self.housing.max(Decimal::ZERO),
            transport: self.transport.max(Decimal::ZERO),
            medical: self.medical.max(Decimal::ZERO),
            other: self.other.max(Decimal::ZERO),
        }
    }
}

/// Non-statutory deductions taken from pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherDeductions {
    /// Loan repayment.
    #[serde(default)]
    pub loan: Decimal,
    /// Savings scheme deduction.
    #[serde(default)]
    pub savings: Decimal,
}

impl OtherDeductions {
    /// Sum of all other deductions.
    ///
    /// Fails when the sum does not fit in a `Decimal`.
    pub fn total(&self) -> EngineResult<Decimal> {
        checked_sum("other_deductions", &[self.loan, self.savings])
    }

    /// Returns a copy with every negative amount raised to zero.
    pub fn clamped(&self) -> Self {
        Self {
            loan: self.loan.max(Decimal::ZERO),
            savings: self.savings.max(Decimal::ZERO),
        }
    }
}

/// Adds `amounts`, reporting an overflow against `field`.
pub(crate) fn checked_sum(field: &str, amounts: &[Decimal]) -> EngineResult<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(*amount))
        .ok_or_else(|| EngineError::InvalidInput {
            field: field.to_string(),
            message: "amount is too large to compute".to_string(),
        })
}

/// The numeric input to a single payroll calculation.
///
/// # Example
///
/// ```
/// use paye_engine::models::{ContributionTier, PayInput, SalaryPeriod};
/// use rust_decimal::Decimal;
///
/// let input = PayInput::new(Decimal::from(1_000_000), SalaryPeriod::Monthly, ContributionTier::Tier1);
/// assert_eq!(input.allowances.total().unwrap(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInput {
    /// Gross salary for the stated period.
    pub gross_salary: Decimal,
    /// The period `gross_salary` is quoted for.
    #[serde(default)]
    pub period: SalaryPeriod,
    /// Monthly allowances.
    #[serde(default)]
    pub allowances: Allowances,
    /// Monthly non-statutory deductions.
    #[serde(default)]
    pub other_deductions: OtherDeductions,
    /// Selected NSSF tier.
    #[serde(default)]
    pub contribution_tier: ContributionTier,
}

impl PayInput {
    /// Creates an input with no allowances and no other deductions.
    pub fn new(gross_salary: Decimal, period: SalaryPeriod, tier: ContributionTier) -> Self {
        Self {
            gross_salary,
            period,
            allowances: Allowances::default(),
            other_deductions: OtherDeductions::default(),
            contribution_tier: tier,
        }
    }

    /// Checks the monetary invariants and returns a copy safe to compute on.
    ///
    /// A negative gross salary is rejected. Negative allowances and deductions
    /// are clamped to zero.
    pub fn sanitized(&self) -> EngineResult<Self> {
        if self.gross_salary < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "gross_salary".to_string(),
                message: format!("must not be negative (got {})", self.gross_salary),
            });
        }

        Ok(Self {
            allowances: self.allowances.clamped(),
            other_deductions: self.other_deductions.clamped(),
            ..*self
        })
    }
}
