//! Currency formatting.
//!
//! The calculator emits raw decimals; this is the only place amounts are
//! rounded for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minor-unit digits displayed for an ISO 4217 currency code.
///
/// Currencies without a minor unit in everyday use show whole units;
/// everything else shows two decimal places.
pub fn minor_units(currency: &str) -> u32 {
    match currency.to_ascii_uppercase().as_str() {
        "UGX" | "RWF" | "BIF" | "JPY" | "KRW" | "XAF" | "XOF" => 0,
        _ => 2,
    }
}

/// Formats `amount` with the currency's usual number of decimal places.
///
/// # Examples
///
/// ```
/// use paye_engine::presentation::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from(789_000), "UGX"), "UGX 789,000");
/// assert_eq!(format_currency(Decimal::from_str("1234.5").unwrap(), "UGX"), "UGX 1,235");
/// assert_eq!(format_currency(Decimal::from_str("-5000").unwrap(), "UGX"), "-UGX 5,000");
/// assert_eq!(format_currency(Decimal::from_str("1234.5").unwrap(), "KES"), "KES 1,234.50");
/// ```
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    format_currency_with(amount, currency, minor_units(currency))
}

/// Formats `amount` rounded to `decimals` places, midpoints away from zero.
pub fn format_currency_with(amount: Decimal, currency: &str, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;

    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut number = group_thousands(whole);
    if let Some(fraction) = fraction {
        number.push('.');
        number.push_str(fraction);
    }

    if negative {
        format!("-{} {}", currency, number)
    } else {
        format!("{} {}", currency, number)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    digits
        .chars()
        .enumerate()
        .fold(String::with_capacity(len + len / 3), |mut out, (i, c)| {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_whole_amounts_are_grouped() {
        assert_eq!(format_currency(dec("0"), "UGX"), "UGX 0");
        assert_eq!(format_currency(dec("999"), "UGX"), "UGX 999");
        assert_eq!(format_currency(dec("1000"), "UGX"), "UGX 1,000");
        assert_eq!(format_currency(dec("1000000"), "UGX"), "UGX 1,000,000");
        assert_eq!(format_currency(dec("12345678"), "UGX"), "UGX 12,345,678");
    }

    #[test]
    fn test_ugx_rounds_to_whole_shillings() {
        assert_eq!(format_currency(dec("83333.3333"), "UGX"), "UGX 83,333");
        assert_eq!(format_currency(dec("0.5"), "UGX"), "UGX 1");
        assert_eq!(format_currency(dec("2.49"), "UGX"), "UGX 2");
    }

    #[test]
    fn test_negative_amounts_carry_leading_sign() {
        assert_eq!(format_currency(dec("-309000"), "UGX"), "-UGX 309,000");
        assert_eq!(format_currency(dec("-0.5"), "UGX"), "-UGX 1");
    }

    #[test]
    fn test_negative_amount_rounding_to_zero_has_no_sign() {
        assert_eq!(format_currency(dec("-0.4"), "UGX"), "UGX 0");
    }

    #[test]
    fn test_two_decimal_currencies() {
        assert_eq!(format_currency(dec("1234567.891"), "USD"), "USD 1,234,567.89");
        assert_eq!(format_currency(dec("5"), "KES"), "KES 5.00");
        assert_eq!(format_currency(dec("0.005"), "KES"), "KES 0.01");
    }

    #[test]
    fn test_explicit_decimals() {
        assert_eq!(format_currency_with(dec("1500.256"), "UGX", 2), "UGX 1,500.26");
    }

    #[test]
    fn test_minor_units_lookup_is_case_insensitive() {
        assert_eq!(minor_units("ugx"), 0);
        assert_eq!(minor_units("EUR"), 2);
    }
}
