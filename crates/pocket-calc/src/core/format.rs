//! Display formatting for calculator numerals
//!
//! The display shows at most [`DIGIT_BUDGET`] significant characters. Values
//! that cannot fit switch to a seven-digit scientific form such as
//! `1.234500e8`. Rounding is half away from zero on the exact binary value,
//! never half-to-even.
//!
//! [`number_to_text`] produces the text the engine keeps in its state: the
//! shortest digits that round-trip, laid out as plain decimal for
//! `1e-7 <= |v| < 1e21` and as `d.ddde±x` otherwise.

use crate::core::{parse_operand, ERROR_MARKER};

/// Visible significant digits on the display
pub const DIGIT_BUDGET: usize = 12;

/// Fraction digits of the scientific display form
pub const SCIENTIFIC_FRACTION_DIGITS: usize = 6;

/// Magnitude at or above which the display goes scientific
const SCIENTIFIC_UPPER: f64 = 1e12;

/// Non-zero magnitude below which the display goes scientific
const SCIENTIFIC_LOWER: f64 = 1e-8;

/// Precision that makes `{:e}` print every digit of an `f64` exactly
const EXACT_PRECISION: usize = 800;

/// Formats operand text for the primary display
///
/// The error marker, unparseable text and non-finite values all render as
/// the error marker.
#[must_use]
pub fn format_display(value: &str) -> String {
    if value == ERROR_MARKER {
        return ERROR_MARKER.to_string();
    }
    match parse_operand(value) {
        Ok(num) => format_number(num),
        Err(_) => ERROR_MARKER.to_string(),
    }
}

/// Formats a number for the primary display
#[must_use]
pub fn format_number(num: f64) -> String {
    if !num.is_finite() {
        return ERROR_MARKER.to_string();
    }

    if needs_scientific(num) {
        let text = to_exponential(num, SCIENTIFIC_FRACTION_DIGITS);
        // seven-digit rounding can lift a value just under 1e-8 into plain range
        return match parse_operand(&text) {
            Ok(rounded) if !needs_scientific(rounded) => format_plain(rounded).unwrap_or(text),
            _ => text,
        };
    }

    format_plain(num).unwrap_or_else(|| to_exponential(num, SCIENTIFIC_FRACTION_DIGITS))
}

fn needs_scientific(num: f64) -> bool {
    let abs = num.abs();
    abs >= SCIENTIFIC_UPPER || (abs > 0.0 && abs < SCIENTIFIC_LOWER)
}

/// Digits in the truncated integer part, counting a minus sign
fn integer_part_len(num: f64) -> usize {
    format!("{}", num.abs().trunc()).len() + usize::from(num < 0.0)
}

/// Fixed-point rendering within the digit budget
///
/// `None` when the integer part, before or after rounding, does not fit.
fn format_plain(num: f64) -> Option<String> {
    let int_len = integer_part_len(num);
    if int_len > DIGIT_BUDGET {
        return None;
    }

    let fixed = to_fixed(num, DIGIT_BUDGET - int_len);
    let rounded = parse_operand(&fixed).ok()?;
    if needs_scientific(rounded) || integer_part_len(rounded) > DIGIT_BUDGET {
        return None;
    }
    Some(number_to_text(rounded))
}

/// Shortest round-trip text of a finite number
///
/// `-0` renders as `"0"`. Non-finite input renders as the error marker.
#[must_use]
pub fn number_to_text(num: f64) -> String {
    if !num.is_finite() {
        return ERROR_MARKER.to_string();
    }
    if num == 0.0 {
        return "0".to_string();
    }

    let (digits, exp) = decimal_parts(&format!("{:e}", num.abs()));
    let sign = if num < 0.0 { "-" } else { "" };
    let k = digits.len() as i32;
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        let mut s = digits_to_string(&digits);
        s.push_str(&"0".repeat((n - k) as usize));
        s
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", digits_to_string(int), digits_to_string(frac))
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits_to_string(&digits))
    } else {
        let e = n - 1;
        let exp_sign = if e < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{exp_sign}{}", digits_to_string(lead), e.abs())
        } else {
            format!(
                "{}.{}e{exp_sign}{}",
                digits_to_string(lead),
                digits_to_string(rest),
                e.abs()
            )
        }
    };

    format!("{sign}{body}")
}

/// Scientific notation with a fixed number of fraction digits
///
/// The exponent carries no `+`: `to_exponential(123_450_000.0, 6)` is
/// `"1.234500e8"`.
#[must_use]
pub fn to_exponential(num: f64, fraction_digits: usize) -> String {
    let sign = if num < 0.0 { "-" } else { "" };
    let significant = fraction_digits + 1;

    let (mut digits, mut exp) = if num == 0.0 {
        (vec![0; significant], 0)
    } else {
        let (digits, exp) = exact_digits(num.abs());
        round_half_up(&digits, exp, significant)
    };
    if digits.len() > significant {
        digits.truncate(significant);
    }
    if digits.is_empty() {
        digits.push(0);
        exp = 0;
    }

    let (lead, rest) = digits.split_at(1);
    if rest.is_empty() {
        format!("{sign}{}e{exp}", digits_to_string(lead))
    } else {
        format!(
            "{sign}{}.{}e{exp}",
            digits_to_string(lead),
            digits_to_string(rest)
        )
    }
}

/// Fixed-point text with exactly `fraction_digits` decimals
///
/// Magnitudes of `1e21` and above fall back to [`number_to_text`].
#[must_use]
pub fn to_fixed(num: f64, fraction_digits: usize) -> String {
    if !num.is_finite() || num.abs() >= 1e21 {
        return number_to_text(num);
    }

    let sign = if num < 0.0 { "-" } else { "" };
    let places = fraction_digits as i32;
    let (digits, exp) = if num == 0.0 {
        (Vec::new(), 0)
    } else {
        let (digits, exp) = exact_digits(num.abs());
        let keep = exp + 1 + places;
        if keep < 0 {
            (Vec::new(), 0)
        } else {
            round_half_up(&digits, exp, keep as usize)
        }
    };

    // digit i sits at the 10^(exp - i) place
    let digit_at = |place: i32| -> u8 {
        let index = exp - place;
        if index >= 0 {
            digits.get(index as usize).copied().unwrap_or(0)
        } else {
            0
        }
    };

    let int_part: String = if digits.is_empty() || exp < 0 {
        "0".to_string()
    } else {
        (0..=exp).rev().map(|p| char::from(b'0' + digit_at(p))).collect()
    };
    let frac_part: String = (1..=places)
        .map(|p| char::from(b'0' + digit_at(-p)))
        .collect();

    if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// Every decimal digit of a positive finite number, trailing zeros removed
fn exact_digits(abs: f64) -> (Vec<u8>, i32) {
    let (mut digits, exp) = decimal_parts(&format!("{:.*e}", EXACT_PRECISION, abs));
    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
    (digits, exp)
}

/// Splits `d.ddde-x` text into its digits and decimal exponent
fn decimal_parts(text: &str) -> (Vec<u8>, i32) {
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text, "0"));
    let digits = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Keeps the leading `keep` digits, rounding half away from zero
///
/// A carry out of the top digit yields one extra leading digit and bumps the
/// exponent.
fn round_half_up(digits: &[u8], exp: i32, keep: usize) -> (Vec<u8>, i32) {
    if digits.len() <= keep {
        let mut kept = digits.to_vec();
        kept.resize(keep, 0);
        return (kept, exp);
    }

    let mut kept = digits[..keep].to_vec();
    if digits[keep] < 5 {
        return (kept, exp);
    }

    for d in kept.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return (kept, exp);
        }
    }
    kept.insert(0, 1);
    (kept, exp + 1)
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== format_display =====

    #[test]
    fn test_format_integer() {
        assert_eq!(format_display("8"), "8");
        assert_eq!(format_display("-5"), "-5");
        assert_eq!(format_display("0"), "0");
    }

    #[test]
    fn test_format_error_marker_unchanged() {
        assert_eq!(format_display(ERROR_MARKER), ERROR_MARKER);
    }

    #[test]
    fn test_format_unparseable_is_error() {
        assert_eq!(format_display("abc"), ERROR_MARKER);
        assert_eq!(format_display("inf"), ERROR_MARKER);
    }

    #[test]
    fn test_format_partial_entry() {
        assert_eq!(format_display("5."), "5");
        assert_eq!(format_display("0."), "0");
        assert_eq!(format_display("-0"), "0");
    }

    #[test]
    fn test_format_float_noise_hidden() {
        assert_eq!(format_display("0.30000000000000004"), "0.3");
    }

    #[test]
    fn test_format_repeating_fraction() {
        assert_eq!(format_display("0.6666666666666666"), "0.66666666667");
        assert_eq!(format_display("-0.6666666666666666"), "-0.6666666667");
    }

    #[test]
    fn test_format_twelve_integer_digits() {
        assert_eq!(format_display("123456789012"), "123456789012");
        assert_eq!(format_display("123456789012.7"), "123456789013");
    }

    #[test]
    fn test_format_large_goes_scientific() {
        assert_eq!(format_display("1234567890123"), "1.234568e12");
        assert_eq!(format_display("-1000000000000"), "-1.000000e12");
    }

    #[test]
    fn test_format_tiny_goes_scientific() {
        assert_eq!(format_display("0.000000001"), "1.000000e-9");
        assert_eq!(format_display("-0.0000000012345"), "-1.234500e-9");
    }

    #[test]
    fn test_format_negative_twelve_digits_goes_scientific() {
        // minus sign counts toward the budget
        assert_eq!(format_display("-123456789012"), "-1.234568e11");
    }

    #[test]
    fn test_format_half_rounds_away_from_zero() {
        assert_eq!(format_display("100000000000.5"), "100000000001");
        assert_eq!(format_display("-10000000000.5"), "-10000000001");
    }

    #[test]
    fn test_format_small_plain_value_uses_short_exponent_text() {
        assert_eq!(format_display("0.000000015"), "1.5e-8");
        assert_eq!(format_display("0.0000000123456789"), "1.235e-8");
    }

    #[test]
    fn test_format_rounding_into_scientific_range() {
        assert_eq!(format_display("999999999999.9"), "1.000000e12");
        assert_eq!(format_display("-99999999999.9"), "-1.000000e11");
    }

    #[test]
    fn test_format_rounding_out_of_tiny_range() {
        assert_eq!(format_display("0.0000000099999999"), "1e-8");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::INFINITY), ERROR_MARKER);
        assert_eq!(format_number(f64::NAN), ERROR_MARKER);
    }

    // ===== number_to_text =====

    #[test]
    fn test_number_to_text_plain() {
        assert_eq!(number_to_text(123.0), "123");
        assert_eq!(number_to_text(100.0), "100");
        assert_eq!(number_to_text(1234.5678), "1234.5678");
        assert_eq!(number_to_text(-0.5), "-0.5");
    }

    #[test]
    fn test_number_to_text_round_trip_digits() {
        assert_eq!(number_to_text(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_number_to_text_negative_zero() {
        assert_eq!(number_to_text(-0.0), "0");
    }

    #[test]
    fn test_number_to_text_small_boundaries() {
        assert_eq!(number_to_text(1e-6), "0.000001");
        assert_eq!(number_to_text(1e-7), "1e-7");
        assert_eq!(number_to_text(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_number_to_text_large_boundaries() {
        assert_eq!(number_to_text(1e20), "100000000000000000000");
        assert_eq!(number_to_text(1e21), "1e+21");
        assert_eq!(number_to_text(-1.5e300), "-1.5e+300");
    }

    // ===== to_exponential / to_fixed =====

    #[test]
    fn test_to_exponential() {
        assert_eq!(to_exponential(123_450_000.0, 6), "1.234500e8");
        assert_eq!(to_exponential(-0.000_012_5, 6), "-1.250000e-5");
        assert_eq!(to_exponential(0.0, 6), "0.000000e0");
    }

    #[test]
    fn test_to_exponential_carry() {
        assert_eq!(to_exponential(9_999_999.5, 6), "1.000000e7");
    }

    #[test]
    fn test_to_exponential_exact_tie_rounds_up() {
        assert_eq!(to_exponential(1_000_000_500_000.0, 6), "1.000001e12");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(1.005, 2), "1.00"); // 1.005 is stored just below
        assert_eq!(to_fixed(0.000_000_015, 11), "0.00000001500");
        assert_eq!(to_fixed(0.0, 3), "0.000");
        assert_eq!(to_fixed(0.0004, 2), "0.00");
        assert_eq!(to_fixed(0.006, 2), "0.01");
        assert_eq!(to_fixed(99.96, 1), "100.0");
    }

    #[test]
    fn test_round_half_up_helper() {
        assert_eq!(round_half_up(&[1, 2, 5], 0, 2), (vec![1, 3], 0));
        assert_eq!(round_half_up(&[1, 2, 4], 0, 2), (vec![1, 2], 0));
        assert_eq!(round_half_up(&[9, 9, 5], 2, 2), (vec![1, 0, 0], 3));
        assert_eq!(round_half_up(&[7], 0, 0), (vec![1], 1));
        assert_eq!(round_half_up(&[3], 0, 3), (vec![3, 0, 0], 0));
    }

    // ===== Property-based tests =====

    proptest! {
        #[test]
        fn prop_format_idempotent(v in -1e15f64..1e15f64) {
            let once = format_display(&number_to_text(v));
            let twice = format_display(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_format_idempotent_small(v in -1e-6f64..1e-6f64) {
            let once = format_display(&number_to_text(v));
            let twice = format_display(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_number_to_text_round_trips(v in proptest::num::f64::NORMAL) {
            let text = number_to_text(v);
            prop_assert_eq!(text.parse::<f64>().unwrap(), v);
        }

        #[test]
        fn prop_format_never_empty(v in proptest::num::f64::ANY) {
            prop_assert!(!format_number(v).is_empty());
        }
    }
}
