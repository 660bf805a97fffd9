//! Common helpers for tax and salary calculations.
//!
//! Rounding to whole rupees, Indian digit grouping for trace text, and the
//! input validation every entry point runs before any arithmetic.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest amount the engine accepts (10^15 rupees).
///
/// Keeps every intermediate product far inside `Decimal`'s range.
pub const MAX_INPUT_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Rounds to the nearest whole rupee, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use tax_engine::calculation::round_whole;
///
/// assert_eq!(round_whole(Decimal::from_str("97499.5").unwrap()), Decimal::from(97_500));
/// assert_eq!(round_whole(Decimal::from_str("97499.49").unwrap()), Decimal::from(97_499));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to two decimal places, halves away from zero.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as whole rupees with Indian digit grouping.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::format_inr;
///
/// assert_eq!(format_inr(Decimal::from(1_200_000)), "12,00,000");
/// assert_eq!(format_inr(Decimal::from(999)), "999");
/// ```
pub fn format_inr(value: Decimal) -> String {
    let rounded = round_whole(value);
    let negative = rounded < Decimal::ZERO;
    let digits = rounded.abs().trunc().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats an amount with the rupee sign, e.g. `₹9,25,000`.
pub fn format_rupees(value: Decimal) -> String {
    format!("₹{}", format_inr(value))
}

/// Accepts an amount only if it is strictly positive and within range.
///
/// This is the step-0 guard of both calculators; `None` means "no
/// computation".
pub fn validate_amount(amount: Decimal) -> Option<Decimal> {
    (amount > Decimal::ZERO && amount <= MAX_INPUT_AMOUNT).then_some(amount)
}

/// Converts a floating point amount, rejecting NaN, infinities and
/// non-positive values.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::amount_from_f64;
///
/// assert!(amount_from_f64(1_500_000.0).is_some());
/// assert!(amount_from_f64(f64::NAN).is_none());
/// assert!(amount_from_f64(f64::INFINITY).is_none());
/// assert!(amount_from_f64(-5.0).is_none());
/// ```
pub fn amount_from_f64(amount: f64) -> Option<Decimal> {
    if !amount.is_finite() {
        return None;
    }
    Decimal::from_f64(amount).and_then(validate_amount)
}

/// Parses user-entered text into a validated amount.
///
/// Accepts digits with an optional fractional part. Digit-group commas and
/// surrounding whitespace are ignored; signs, exponents and any other
/// characters are rejected.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::parse_amount;
///
/// assert_eq!(parse_amount("12,00,000"), Some(Decimal::from(1_200_000)));
/// assert_eq!(parse_amount(""), None);
/// assert_eq!(parse_amount("abc"), None);
/// assert_eq!(parse_amount("0"), None);
/// ```
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (cleaned.as_str(), None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return None;
    }

    Decimal::from_str(&cleaned).ok().and_then(validate_amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_max_input_amount_is_ten_to_the_fifteen() {
        assert_eq!(MAX_INPUT_AMOUNT, dec("1000000000000000"));
    }

    #[test]
    fn test_round_whole_half_rounds_up() {
        assert_eq!(round_whole(dec("0.5")), dec("1"));
        assert_eq!(round_whole(dec("1.04")), dec("1"));
        assert_eq!(round_whole(dec("33800.0")), dec("33800"));
        assert_eq!(round_whole(dec("12.499")), dec("12"));
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(dec("6.5")), dec("6.50"));
        assert_eq!(round_percent(dec("6.666666")), dec("6.67"));
        assert_eq!(round_percent(dec("6.665")), dec("6.67"));
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(dec("0")), "0");
        assert_eq!(format_inr(dec("1")), "1");
        assert_eq!(format_inr(dec("1000")), "1,000");
        assert_eq!(format_inr(dec("75000")), "75,000");
        assert_eq!(format_inr(dec("400001")), "4,00,001");
        assert_eq!(format_inr(dec("1425000")), "14,25,000");
        assert_eq!(format_inr(dec("24000000")), "2,40,00,000");
        assert_eq!(format_inr(dec("123456789")), "12,34,56,789");
    }

    #[test]
    fn test_format_inr_rounds_fractions() {
        assert_eq!(format_inr(dec("32499.5")), "32,500");
        assert_eq!(format_inr(dec("1.04")), "1");
    }

    #[test]
    fn test_format_inr_negative() {
        assert_eq!(format_inr(dec("-150000")), "-1,50,000");
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(dec("925000")), "₹9,25,000");
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(dec("1")), Some(dec("1")));
        assert_eq!(validate_amount(dec("0")), None);
        assert_eq!(validate_amount(dec("-1")), None);
        assert_eq!(validate_amount(MAX_INPUT_AMOUNT), Some(MAX_INPUT_AMOUNT));
        assert_eq!(validate_amount(MAX_INPUT_AMOUNT + Decimal::ONE), None);
    }

    #[test]
    fn test_amount_from_f64() {
        assert_eq!(amount_from_f64(1_000_000.0), Some(dec("1000000")));
        assert_eq!(amount_from_f64(0.0), None);
        assert_eq!(amount_from_f64(f64::NEG_INFINITY), None);
        assert_eq!(amount_from_f64(1e30), None);
    }

    #[test]
    fn test_parse_amount_accepts_digits() {
        assert_eq!(parse_amount("1500000"), Some(dec("1500000")));
        assert_eq!(parse_amount("  1500000 "), Some(dec("1500000")));
        assert_eq!(parse_amount("15,00,000"), Some(dec("1500000")));
        assert_eq!(parse_amount("1,500,000.50"), Some(dec("1500000.50")));
    }

    #[test]
    fn test_parse_amount_rejects_invalid_text() {
        assert_eq!(parse_amount("-100"), None);
        assert_eq!(parse_amount("+100"), None);
        assert_eq!(parse_amount("1e6"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("12.3.4"), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("100."), None);
        assert_eq!(parse_amount("0.00"), None);
    }
}
