//! Decimal rendering of base-unit amounts.
//!
//! An amount `n` with exponent `e` is shown as `n / 10^e` by moving the
//! decimal point, never by dividing, so the text is exact for any magnitude.
//! The integer part is grouped in threes with `'`; the fraction is never
//! grouped and loses its trailing zeros (and the point, if nothing remains).
//!
//! Parsing accepts exactly the strings formatting can produce.

use crate::error::TextualError;
use malachite::Natural;
use std::str::FromStr;

const GROUP_SEPARATOR: char = '\'';
const DECIMAL_POINT: char = '.';

/// Render `amount` base units as display text for `exponent`.
pub fn format_amount(amount: &Natural, exponent: u32) -> String {
    let digits = amount.to_string();
    let exponent = exponent as usize;

    let (integer, fraction) = if exponent == 0 {
        (digits.as_str(), String::new())
    } else if digits.len() > exponent {
        let (integer, fraction) = digits.split_at(digits.len() - exponent);
        (integer, fraction.to_string())
    } else {
        let mut padded = "0".repeat(exponent - digits.len());
        padded.push_str(&digits);
        ("0", padded)
    };

    let mut text = group_thousands(integer);
    let fraction = fraction.trim_end_matches('0');
    if !fraction.is_empty() {
        text.push(DECIMAL_POINT);
        text.push_str(fraction);
    }
    text
}

/// Recover the base-unit amount from display text.
pub fn parse_amount(text: &str, exponent: u32) -> Result<Natural, TextualError> {
    let malformed = || TextualError::MalformedNumber(text.to_string());

    let (integer, fraction) = match text.split_once(DECIMAL_POINT) {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };

    let mut digits = ungroup(integer).ok_or_else(malformed)?;

    let fraction = match fraction {
        None => "",
        Some(fraction) => {
            if fraction.is_empty() || !is_digits(fraction) || fraction.ends_with('0') {
                return Err(malformed());
            }
            fraction
        }
    };

    let exponent_len = exponent as usize;
    if fraction.len() > exponent_len {
        return Err(TextualError::PrecisionExceeded {
            text: text.to_string(),
            exponent,
        });
    }

    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(exponent_len - fraction.len()));

    let significant = digits.trim_start_matches('0');
    let significant = if significant.is_empty() { "0" } else { significant };
    Natural::from_str(significant).map_err(|_| malformed())
}

fn group_thousands(integer: &str) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}

/// Strip grouping separators, enforcing `digit{1,3} ("'" digit{3})*` without
/// a leading zero, or a bare `0`.
fn ungroup(integer: &str) -> Option<String> {
    if integer == "0" {
        return Some(integer.to_string());
    }

    let mut groups = integer.split(GROUP_SEPARATOR);
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 || !is_digits(head) || head.starts_with('0') {
        return None;
    }

    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || !is_digits(group) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
