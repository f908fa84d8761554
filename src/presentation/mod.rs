//! Presentation and export of computed pay.
//!
//! Nothing here feeds back into the calculator: these functions only turn
//! raw decimals into display strings and printable documents.

mod currency;
mod payslip;

pub use currency::{format_currency, format_currency_with, minor_units};
pub use payslip::{DEFAULT_COMPANY_NAME, PAYSLIP_TITLE, Payslip, PayslipLine};
