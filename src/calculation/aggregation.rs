//! Net pay aggregation.
//!
//! Runs the full pipeline for one employee:
//! normalized gross → taxable income → {PAYE, NSSF} → deductions → net pay.

use rust_decimal::Decimal;

use crate::config::PayrollSchedule;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, BandTax, PayInput, PayResult, checked_sum};

use super::contribution::calculate_contribution;
use super::normalization::normalize_gross;
use super::tax::calculate_paye;

/// Everything produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PayrollCalculation {
    /// The computed pay figures.
    pub pay: PayResult,
    /// PAYE levied per band.
    pub tax_breakdown: Vec<BandTax>,
    /// Ordered audit steps, one per pipeline stage.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings about results that are surfaced as-is.
    pub warnings: Vec<AuditWarning>,
}

/// Computes net pay for `input` under `schedule`.
///
/// Net pay is not clamped and may be negative when deductions exceed
/// earnings. A negative gross salary is rejected.
///
/// # Examples
///
/// ```no_run
/// use paye_engine::calculation::compute_payroll;
/// use paye_engine::config::ConfigLoader;
/// use paye_engine::models::{ContributionTier, PayInput, SalaryPeriod};
/// use rust_decimal::Decimal;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ug_paye")?;
/// let schedule = loader.get_schedule(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())?;
/// let input = PayInput::new(Decimal::from(1_000_000), SalaryPeriod::Monthly, ContributionTier::Tier1);
///
/// let result = compute_payroll(&input, schedule)?;
/// assert_eq!(result.net_pay, Decimal::from(789_000));
/// # Ok::<(), paye_engine::error::EngineError>(())
/// ```
pub fn compute_payroll(input: &PayInput, schedule: &PayrollSchedule) -> EngineResult<PayResult> {
    calculate_payroll(input, schedule).map(|calculation| calculation.pay)
}

/// Runs the pipeline and keeps the band breakdown, audit steps and warnings.
pub fn calculate_payroll(
    input: &PayInput,
    schedule: &PayrollSchedule,
) -> EngineResult<PayrollCalculation> {
    let input = input.sanitized()?;
    let mut audit_steps = Vec::with_capacity(5);
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let normalization = normalize_gross(input.gross_salary, input.period, step_number);
    let gross_monthly = normalization.gross_monthly;
    audit_steps.push(normalization.audit_step);
    step_number += 1;

    let total_allowances = input.allowances.total()?;
    let taxable_income = checked_sum("taxable_income", &[gross_monthly, total_allowances])?;
    audit_steps.push(taxable_income_step(
        &input,
        gross_monthly,
        total_allowances,
        taxable_income,
        step_number,
    ));
    step_number += 1;

    let paye = calculate_paye(taxable_income, schedule, step_number);
    audit_steps.push(paye.audit_step);
    step_number += 1;

    let contribution = calculate_contribution(
        taxable_income,
        input.contribution_tier,
        &schedule.contributions,
        step_number,
    );
    audit_steps.push(contribution.audit_step);
    step_number += 1;

    let total_other_deductions = input.other_deductions.total()?;
    let total_deductions = checked_sum(
        "total_deductions",
        &[paye.tax, contribution.shares.employee, total_other_deductions],
    )?;
    // Both operands are non-negative, so this cannot overflow.
    let net_pay = taxable_income - total_deductions;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        statutory_ref: "payroll".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "tax": paye.tax.normalize().to_string(),
            "employee_contribution": contribution.shares.employee.normalize().to_string(),
            "loan": input.other_deductions.loan.normalize().to_string(),
            "savings": input.other_deductions.savings.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_other_deductions": total_other_deductions.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} - ({} PAYE + {} NSSF + {} other) = {}",
            taxable_income.normalize(),
            paye.tax.normalize(),
            contribution.shares.employee.normalize(),
            total_other_deductions.normalize(),
            net_pay.normalize()
        ),
    });

    if net_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!(
                "Deductions of {} exceed earnings of {}",
                total_deductions.normalize(),
                taxable_income.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    Ok(PayrollCalculation {
        pay: PayResult {
            gross_monthly,
            total_allowances,
            taxable_income,
            tax: paye.tax,
            employee_contribution: contribution.shares.employee,
            employer_contribution: contribution.shares.employer,
            total_other_deductions,
            total_deductions,
            net_pay,
        },
        tax_breakdown: paye.breakdown,
        audit_steps,
        warnings,
    })
}

fn taxable_income_step(
    input: &PayInput,
    gross_monthly: Decimal,
    total_allowances: Decimal,
    taxable_income: Decimal,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        statutory_ref: "payroll".to_string(),
        input: serde_json::json!({
            "gross_monthly": gross_monthly.normalize().to_string(),
            "housing": input.allowances.housing.normalize().to_string(),
            "transport": input.allowances.transport.normalize().to_string(),
            "medical": input.allowances.medical.normalize().to_string(),
            "other": input.allowances.other.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_allowances": total_allowances.normalize().to_string(),
            "taxable_income": taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "{} gross + {} allowances = {}",
            gross_monthly.normalize(),
            total_allowances.normalize(),
            taxable_income.normalize()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContributionScheme;
    use crate::error::EngineError;
    use crate::models::{Allowances, ContributionTier, OtherDeductions, SalaryPeriod, TaxBand, TaxBands};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn uganda_schedule() -> PayrollSchedule {
        PayrollSchedule {
            effective_date: NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            tax_reference: "Income Tax Act, Third Schedule Part I".to_string(),
            tax_bands: TaxBands::new(vec![
                TaxBand::bounded(dec("235000"), dec("0")),
                TaxBand::bounded(dec("335000"), dec("0.10")),
                TaxBand::bounded(dec("410000"), dec("0.20")),
                TaxBand::bounded(dec("10000000"), dec("0.30")),
                TaxBand::unbounded(dec("0.40")),
            ])
            .unwrap(),
            contributions: ContributionScheme {
                reference: "NSSF Act s.12".to_string(),
                threshold: dec("180000"),
                employee_rate: dec("0.05"),
                employer_rate: dec("0.10"),
                excess_employee_rate: dec("0.10"),
            },
        }
    }

    fn monthly(gross: &str, tier: ContributionTier) -> PayInput {
        PayInput::new(dec(gross), SalaryPeriod::Monthly, tier)
    }

    /// AG-001: 1,000,000 monthly, tier 1, nothing else
    #[test]
    fn test_one_million_monthly_tier1() {
        let result = compute_payroll(&monthly("1000000", ContributionTier::Tier1), &uganda_schedule())
            .unwrap();

        assert_eq!(result.gross_monthly, dec("1000000"));
        assert_eq!(result.total_allowances, Decimal::ZERO);
        assert_eq!(result.taxable_income, dec("1000000"));
        assert_eq!(result.tax, dec("202000"));
        assert_eq!(result.employee_contribution, dec("9000"));
        assert_eq!(result.employer_contribution, dec("18000"));
        assert_eq!(result.total_other_deductions, Decimal::ZERO);
        assert_eq!(result.total_deductions, dec("211000"));
        assert_eq!(result.net_pay, dec("789000"));
        assert!(result.is_consistent());
    }

    /// AG-002: annual input is normalized before anything else
    #[test]
    fn test_annual_input_matches_monthly_equivalent() {
        let annual = PayInput::new(dec("12000000"), SalaryPeriod::Annual, ContributionTier::Tier1);
        let from_annual = compute_payroll(&annual, &uganda_schedule()).unwrap();
        let from_monthly =
            compute_payroll(&monthly("1000000", ContributionTier::Tier1), &uganda_schedule())
                .unwrap();

        assert_eq!(from_annual.gross_monthly, dec("1000000"));
        assert_eq!(from_annual, from_monthly);
    }

    /// AG-003: allowances raise taxable income, deductions lower net pay
    #[test]
    fn test_allowances_and_deductions() {
        let input = PayInput {
            gross_salary: dec("800000"),
            period: SalaryPeriod::Monthly,
            allowances: Allowances {
                housing: dec("100000"),
                transport: dec("50000"),
                medical: dec("30000"),
                other: dec("20000"),
            },
            other_deductions: OtherDeductions {
                loan: dec("50000"),
                savings: dec("25000"),
            },
            contribution_tier: ContributionTier::Tier2,
        };

        let result = compute_payroll(&input, &uganda_schedule()).unwrap();

        assert_eq!(result.total_allowances, dec("200000"));
        assert_eq!(result.taxable_income, dec("1000000"));
        assert_eq!(result.tax, dec("202000"));
        // 9,000 + 10% of 820,000
        assert_eq!(result.employee_contribution, dec("91000"));
        assert_eq!(result.employer_contribution, dec("100000"));
        assert_eq!(result.total_other_deductions, dec("75000"));
        assert_eq!(result.total_deductions, dec("368000"));
        assert_eq!(result.net_pay, dec("632000"));
        assert!(result.is_consistent());
    }

    /// AG-004: net pay can go negative and is surfaced, not clamped
    #[test]
    fn test_negative_net_pay_is_surfaced_with_warning() {
        let mut input = monthly("200000", ContributionTier::Tier1);
        input.other_deductions.loan = dec("500000");

        let calculation = calculate_payroll(&input, &uganda_schedule()).unwrap();

        // 200,000 - (0 PAYE + 9,000 NSSF + 500,000 loan)
        assert_eq!(calculation.pay.net_pay, dec("-309000"));
        assert_eq!(calculation.warnings.len(), 1);
        assert_eq!(calculation.warnings[0].code, "NEGATIVE_NET_PAY");
    }

    #[test]
    fn test_negative_gross_is_rejected() {
        let input = monthly("-1", ContributionTier::Tier1);
        match compute_payroll(&input, &uganda_schedule()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "gross_salary"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_taxable_income_past_decimal_max_is_rejected() {
        let mut input = PayInput::new(Decimal::MAX, SalaryPeriod::Monthly, ContributionTier::Tier1);
        input.allowances.housing = Decimal::ONE;

        match calculate_payroll(&input, &uganda_schedule()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "taxable_income"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_other_deductions_past_decimal_max_are_rejected() {
        let mut input = monthly("1000000", ContributionTier::Tier1);
        input.other_deductions = OtherDeductions {
            loan: Decimal::MAX,
            savings: Decimal::MAX,
        };

        match compute_payroll(&input, &uganda_schedule()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "other_deductions"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_allowances_past_decimal_max_are_rejected() {
        let mut input = monthly("1000000", ContributionTier::Tier2);
        input.allowances = Allowances {
            housing: Decimal::MAX,
            transport: Decimal::MAX,
            ..Allowances::default()
        };

        match compute_payroll(&input, &uganda_schedule()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "allowances"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_salary_still_computes() {
        let input = PayInput::new(Decimal::MAX, SalaryPeriod::Monthly, ContributionTier::Tier2);

        let result = compute_payroll(&input, &uganda_schedule()).unwrap();
        assert_eq!(result.taxable_income, Decimal::MAX);
        assert!(result.net_pay > Decimal::ZERO);
        assert!(result.tax < result.taxable_income);
    }

    #[test]
    fn test_negative_optional_amounts_are_clamped() {
        let mut input = monthly("1000000", ContributionTier::Tier1);
        input.allowances.housing = dec("-50000");
        input.other_deductions.savings = dec("-10000");

        let result = compute_payroll(&input, &uganda_schedule()).unwrap();
        assert_eq!(result.total_allowances, Decimal::ZERO);
        assert_eq!(result.total_other_deductions, Decimal::ZERO);
        assert_eq!(result.net_pay, dec("789000"));
    }

    #[test]
    fn test_zero_gross_yields_zero_everything() {
        let result =
            compute_payroll(&monthly("0", ContributionTier::Tier2), &uganda_schedule()).unwrap();
        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.employee_contribution, Decimal::ZERO);
        assert_eq!(result.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_audit_steps_are_sequenced() {
        let calculation =
            calculate_payroll(&monthly("1000000", ContributionTier::Tier1), &uganda_schedule())
                .unwrap();

        let rule_ids: Vec<&str> = calculation
            .audit_steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "salary_normalization",
                "taxable_income",
                "paye",
                "nssf_contribution",
                "net_pay"
            ]
        );

        for (index, step) in calculation.audit_steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
        assert!(calculation.warnings.is_empty());
        assert_eq!(calculation.tax_breakdown.len(), 4);
    }

    #[test]
    fn test_net_pay_reasoning_shows_arithmetic() {
        let calculation =
            calculate_payroll(&monthly("1000000", ContributionTier::Tier1), &uganda_schedule())
                .unwrap();
        let net_step = calculation.audit_steps.last().unwrap();

        assert_eq!(
            net_step.reasoning,
            "1000000 - (202000 PAYE + 9000 NSSF + 0 other) = 789000"
        );
    }
}
