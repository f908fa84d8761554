//! Printable payslip document.
//!
//! A [`Payslip`] holds formatted strings only. It is built from a computed
//! [`PayResult`] and can be laid out as fixed-width text for download.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{EmployeeDetails, PayResult};

use super::currency::format_currency;

/// Title printed at the top of every payslip.
pub const PAYSLIP_TITLE: &str = "EMPLOYEE SALARY SLIP";

/// Company name used when the caller does not supply one.
pub const DEFAULT_COMPANY_NAME: &str = "XYZ Corporation";

const PAGE_WIDTH: usize = 64;

/// A labelled, formatted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// Row label (e.g. "PAYE Tax").
    pub label: String,
    /// Formatted amount (e.g. "UGX 202,000").
    pub amount: String,
}

impl PayslipLine {
    fn new(label: &str, amount: String) -> Self {
        Self {
            label: label.to_string(),
            amount,
        }
    }
}

/// A payslip ready for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Document title.
    pub title: String,
    /// Issuing company.
    pub company_name: String,
    /// Date the payslip was issued.
    pub issued_on: NaiveDate,
    /// Employee identity.
    pub employee: EmployeeDetails,
    /// ISO currency code of every amount.
    pub currency: String,
    /// Basic salary, allowances and taxable income.
    pub earnings: Vec<PayslipLine>,
    /// PAYE, employee NSSF and other deductions.
    pub deductions: Vec<PayslipLine>,
    /// Sum of all deductions.
    pub total_deductions: PayslipLine,
    /// Take-home pay.
    pub net_pay: PayslipLine,
    /// Employer-side costs shown for information.
    pub employer_contributions: Vec<PayslipLine>,
}

impl Payslip {
    /// Builds a payslip from a computed result.
    pub fn new(
        employee: EmployeeDetails,
        pay: &PayResult,
        currency: &str,
        company_name: &str,
        issued_on: NaiveDate,
    ) -> Self {
        let fmt = |amount| format_currency(amount, currency);

        Self {
            title: PAYSLIP_TITLE.to_string(),
            company_name: company_name.to_string(),
            issued_on,
            employee,
            currency: currency.to_string(),
            earnings: vec![
                PayslipLine::new("Basic Salary", fmt(pay.gross_monthly)),
                PayslipLine::new("Total Allowances", fmt(pay.total_allowances)),
                PayslipLine::new("Taxable Income", fmt(pay.taxable_income)),
            ],
            deductions: vec![
                PayslipLine::new("PAYE Tax", fmt(pay.tax)),
                PayslipLine::new("Employee NSSF", fmt(pay.employee_contribution)),
                PayslipLine::new("Other Deductions", fmt(pay.total_other_deductions)),
            ],
            total_deductions: PayslipLine::new("Total Deductions", fmt(pay.total_deductions)),
            net_pay: PayslipLine::new("NET PAY", fmt(pay.net_pay)),
            employer_contributions: vec![PayslipLine::new(
                "Employer NSSF",
                fmt(pay.employer_contribution),
            )],
        }
    }

    /// Suggested download file name, derived from the employee name.
    ///
    /// ```
    /// use paye_engine::presentation::Payslip;
    /// use paye_engine::models::{EmployeeDetails, PayResult};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let pay = PayResult {
    ///     gross_monthly: Decimal::ZERO,
    ///     total_allowances: Decimal::ZERO,
    ///     taxable_income: Decimal::ZERO,
    ///     tax: Decimal::ZERO,
    ///     employee_contribution: Decimal::ZERO,
    ///     employer_contribution: Decimal::ZERO,
    ///     total_other_deductions: Decimal::ZERO,
    ///     total_deductions: Decimal::ZERO,
    ///     net_pay: Decimal::ZERO,
    /// };
    /// let employee = EmployeeDetails {
    ///     name: "Jane Doe".to_string(),
    ///     id: "EMP-001".to_string(),
    ///     department: "Finance".to_string(),
    /// };
    /// let slip = Payslip::new(employee, &pay, "UGX", "XYZ Corporation",
    ///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    /// assert_eq!(slip.file_name(), "Jane-Doe-salary-slip.txt");
    /// ```
    pub fn file_name(&self) -> String {
        let stem: String = self
            .employee
            .name
            .trim()
            .chars()
            .filter_map(|c| match c {
                c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
                c if c.is_whitespace() => Some('-'),
                _ => None,
            })
            .collect();
        let stem = if stem.is_empty() { "employee" } else { stem.as_str() };
        format!("{}-salary-slip.txt", stem)
    }

    /// Lays the payslip out as fixed-width plain text.
    pub fn render_text(&self) -> String {
        let rule = "-".repeat(PAGE_WIDTH);
        let mut out = String::new();

        out.push_str(&format!("{:^width$}\n\n", self.title, width = PAGE_WIDTH));
        out.push_str(&two_column(
            &format!("Company Name: {}", self.company_name),
            &format!("Date: {}", self.issued_on.format("%Y-%m-%d")),
        ));
        out.push('\n');
        out.push_str(&format!("Employee Name: {}\n", self.employee.name));
        out.push_str(&format!("Employee ID: {}\n", self.employee.id));
        out.push_str(&format!("Department: {}\n\n", self.employee.department));

        out.push_str("Salary Details\n");
        out.push_str(&two_column(
            "Description",
            &format!("Amount ({})", self.currency),
        ));
        for line in &self.earnings {
            out.push_str(&line_row(line));
        }
        out.push_str(&rule);
        out.push('\n');
        for line in &self.deductions {
            out.push_str(&line_row(line));
        }
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&line_row(&self.total_deductions));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&line_row(&self.net_pay));
        out.push('\n');

        for line in &self.employer_contributions {
            out.push_str(&line_row(line));
        }
        out.push('\n');
        out.push_str(&two_column(
            "Authorized Signature: ____________",
            "Date: ____________",
        ));

        out
    }
}

fn line_row(line: &PayslipLine) -> String {
    two_column(&line.label, &line.amount)
}

fn two_column(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let padding = PAGE_WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}\n", left, " ".repeat(padding), right)
}
