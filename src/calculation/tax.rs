//! PAYE income tax calculation.
//!
//! Tax is levied band by band: the slice of taxable income falling above a
//! band's lower edge and at or below its upper bound is taxed at the band's
//! rate. Income exactly on a boundary belongs to the band that boundary
//! terminates.

use rust_decimal::Decimal;

use crate::config::PayrollSchedule;
use crate::models::{AuditStep, BandTax, TaxBands};

use super::percent;

/// The result of a PAYE calculation, including the per-band breakdown and audit step.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// Total tax due.
    pub tax: Decimal,
    /// Tax per band, for every band that taxed a non-zero slice.
    pub breakdown: Vec<BandTax>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes progressive tax on `taxable_income`.
///
/// The function is total: zero or negative income yields zero tax, and
/// everything above the last finite bound is taxed at the top rate.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::compute_tax;
/// use paye_engine::models::{TaxBand, TaxBands};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let bands = TaxBands::new(vec![
///     TaxBand::bounded(dec("235000"), dec("0")),
///     TaxBand::bounded(dec("335000"), dec("0.10")),
///     TaxBand::bounded(dec("410000"), dec("0.20")),
///     TaxBand::bounded(dec("10000000"), dec("0.30")),
///     TaxBand::unbounded(dec("0.40")),
/// ])
/// .unwrap();
///
/// assert_eq!(compute_tax(dec("1000000"), &bands), dec("202000"));
/// assert_eq!(compute_tax(dec("235000"), &bands), Decimal::ZERO);
/// ```
pub fn compute_tax(taxable_income: Decimal, bands: &TaxBands) -> Decimal {
    bands
        .segments()
        .take_while(|segment| taxable_income > segment.lower)
        .map(|segment| segment.portion_of(taxable_income) * segment.rate)
        .sum()
}

/// Breaks tax on `taxable_income` down by band.
///
/// Only bands that receive a non-zero slice of income are listed, so a
/// zero-rate first band still appears when income reaches into it.
pub fn tax_breakdown(taxable_income: Decimal, bands: &TaxBands) -> Vec<BandTax> {
    bands
        .segments()
        .take_while(|segment| taxable_income > segment.lower)
        .map(|segment| {
            let taxed_amount = segment.portion_of(taxable_income);
            BandTax {
                lower: segment.lower,
                upper: segment.upper,
                rate: segment.rate,
                taxed_amount,
                tax: taxed_amount * segment.rate,
            }
        })
        .collect()
}

/// Calculates PAYE under a schedule, recording the band breakdown and an audit step.
///
/// # Arguments
///
/// * `taxable_income` - Monthly gross plus allowances
/// * `schedule` - The statutory schedule supplying the tax bands
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_paye(
    taxable_income: Decimal,
    schedule: &PayrollSchedule,
    step_number: u32,
) -> PayeResult {
    let breakdown = tax_breakdown(taxable_income, &schedule.tax_bands);
    let tax = compute_tax(taxable_income, &schedule.tax_bands);

    let reasoning = if breakdown.is_empty() {
        format!("Taxable income {} attracts no tax", taxable_income.normalize())
    } else {
        let parts: Vec<String> = breakdown
            .iter()
            .map(|b| {
                format!(
                    "{} at {}%",
                    b.taxed_amount.normalize(),
                    percent(b.rate)
                )
            })
            .collect();
        format!("{} = {}", parts.join(" + "), tax.normalize())
    };

    let bands_json: Vec<serde_json::Value> = breakdown
        .iter()
        .map(|b| {
            serde_json::json!({
                "lower": b.lower.normalize().to_string(),
                "upper": b.upper.map(|u| u.normalize().to_string()),
                "rate": b.rate.normalize().to_string(),
                "taxed_amount": b.taxed_amount.normalize().to_string(),
                "tax": b.tax.normalize().to_string()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "paye".to_string(),
        rule_name: "PAYE Income Tax".to_string(),
        statutory_ref: schedule.tax_reference.clone(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "band_count": schedule.tax_bands.len()
        }),
        output: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "bands": bands_json
        }),
        reasoning,
    };

    PayeResult {
        tax,
        breakdown,
        audit_step,
    }
}
