//! Pay form validation.
//!
//! A [`PayForm`] carries the raw text a user typed. [`validate_form`] turns it
//! into an [`EmployeeDetails`] and a [`PayInput`], reporting every failing
//! required field at once. Optional amounts never fail: blank or unparsable
//! text becomes zero and negative values are clamped to zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult, FieldError};
use crate::models::{
    Allowances, ContributionTier, EmployeeDetails, OtherDeductions, PayInput, SalaryPeriod,
};

/// Raw pay form fields as entered.
///
/// Every field accepts a JSON string or number; numbers are kept as their
/// textual form and parsed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayForm {
    /// Employee full name (required).
    #[serde(default, deserialize_with = "raw_text")]
    pub employee_name: String,
    /// Employee identifier (required).
    #[serde(default, deserialize_with = "raw_text")]
    pub employee_id: String,
    /// Department (required).
    #[serde(default, deserialize_with = "raw_text")]
    pub department: String,
    /// Gross salary (required, non-negative number).
    #[serde(default, deserialize_with = "raw_text")]
    pub gross_salary: String,
    /// "monthly" or "annual"; blank means monthly.
    #[serde(default, deserialize_with = "raw_text")]
    pub salary_period: String,
    /// Housing allowance.
    #[serde(default, deserialize_with = "raw_text")]
    pub housing: String,
    /// Transport allowance.
    #[serde(default, deserialize_with = "raw_text")]
    pub transport: String,
    /// Medical allowance.
    #[serde(default, deserialize_with = "raw_text")]
    pub medical: String,
    /// Any other allowance.
    #[serde(default, deserialize_with = "raw_text")]
    pub other_allowance: String,
    /// Loan repayment.
    #[serde(default, deserialize_with = "raw_text")]
    pub loan: String,
    /// Savings deduction.
    #[serde(default, deserialize_with = "raw_text")]
    pub savings: String,
    /// "tier1" or "tier2"; blank means tier1.
    #[serde(default, deserialize_with = "raw_text")]
    pub contribution_tier: String,
}

fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    /// Identity fields, trimmed.
    pub employee: EmployeeDetails,
    /// Numeric input ready for the calculator.
    pub input: PayInput,
}

/// Parses a monetary amount typed by a user.
///
/// Surrounding whitespace and `,` digit-group separators are ignored.
/// Returns `None` for blank or non-numeric text.
///
/// # Examples
///
/// ```
/// use paye_engine::validation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount(" 1,250,000 "), Some(Decimal::from(1_250_000)));
/// assert_eq!(parse_amount("abc"), None);
/// assert_eq!(parse_amount(""), None);
/// ```
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Parses an optional amount: blank or invalid text is zero, negatives clamp to zero.
pub fn optional_amount(text: &str) -> Decimal {
    parse_amount(text)
        .map(|amount| amount.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

fn required_text(value: &str, field: &str, message: &str, errors: &mut Vec<FieldError>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, message));
    }
    trimmed.to_string()
}

fn parse_or_default<T>(text: &str, field: &str, message: &str, errors: &mut Vec<FieldError>) -> T
where
    T: FromStr + Default,
{
    if text.trim().is_empty() {
        return T::default();
    }
    text.parse().unwrap_or_else(|_| {
        errors.push(FieldError::new(field, message));
        T::default()
    })
}

/// Validates a raw pay form.
///
/// All problems with required fields are collected and returned together in
/// [`EngineError::ValidationFailed`].
///
/// # Examples
///
/// ```
/// use paye_engine::validation::{PayForm, validate_form};
/// use rust_decimal::Decimal;
///
/// let form = PayForm {
///     employee_name: "Jane Doe".to_string(),
///     employee_id: "EMP-001".to_string(),
///     department: "Finance".to_string(),
///     gross_salary: "1000000".to_string(),
///     housing: "oops".to_string(),
///     ..PayForm::default()
/// };
///
/// let validated = validate_form(&form).unwrap();
/// assert_eq!(validated.input.gross_salary, Decimal::from(1_000_000));
/// assert_eq!(validated.input.allowances.housing, Decimal::ZERO);
/// ```
pub fn validate_form(form: &PayForm) -> EngineResult<ValidatedForm> {
    let mut errors = Vec::new();

    let name = required_text(
        &form.employee_name,
        "employee_name",
        "Employee name is required",
        &mut errors,
    );
    let id = required_text(
        &form.employee_id,
        "employee_id",
        "Employee ID is required",
        &mut errors,
    );
    let department = required_text(
        &form.department,
        "department",
        "Department is required",
        &mut errors,
    );

    let gross_salary = match parse_amount(&form.gross_salary) {
        None => {
            errors.push(FieldError::new("gross_salary", "Please enter a valid salary"));
            Decimal::ZERO
        }
        Some(amount) if amount < Decimal::ZERO => {
            errors.push(FieldError::new("gross_salary", "Salary cannot be negative"));
            Decimal::ZERO
        }
        Some(amount) => amount,
    };

    let period: SalaryPeriod = parse_or_default(
        &form.salary_period,
        "salary_period",
        "Salary period must be monthly or annual",
        &mut errors,
    );
    let contribution_tier: ContributionTier = parse_or_default(
        &form.contribution_tier,
        "contribution_tier",
        "Contribution tier must be tier1 or tier2",
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(EngineError::ValidationFailed { errors });
    }

    Ok(ValidatedForm {
        employee: EmployeeDetails {
            name,
            id,
            department,
        },
        input: PayInput {
            gross_salary,
            period,
            allowances: Allowances {
                housing: optional_amount(&form.housing),
                transport: optional_amount(&form.transport),
                medical: optional_amount(&form.medical),
                other: optional_amount(&form.other_allowance),
            },
            other_deductions: OtherDeductions {
                loan: optional_amount(&form.loan),
                savings: optional_amount(&form.savings),
            },
            contribution_tier,
        },
    })
}
