//! # Amount Conversion
//!
//! Exact conversion between human-decimal amounts ("0.1") and integer
//! smallest-unit amounts (lamports, micro-USDC), using `rust_decimal`.
//!
//! Rounding is half-away-from-zero everywhere: amounts are positive, so a
//! tie always rounds up.

use lib_core::error::SwapError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// Largest scale `Decimal` can represent.
const MAX_SCALE: u8 = 28;

/// Exponents past this magnitude overflow (or vanish) regardless of mantissa.
const MAX_EXPONENT: i64 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
    #[error("amount '{amount}' is smaller than one unit of a {decimals}-decimal token")]
    BelowSmallestUnit { amount: String, decimals: u8 },
    #[error("unsupported decimal precision: {0}")]
    UnsupportedDecimals(u8),
}

impl From<AmountError> for SwapError {
    fn from(err: AmountError) -> Self {
        SwapError::InputValidation(err.to_string())
    }
}

/// Parse a plain or scientific decimal string.
///
/// Accepts `"1"`, `"0.1"`, `".5"`, `"1."`, `"1e-3"`, an optional sign and
/// surrounding whitespace. Rejects `NaN`, `inf` and anything with trailing
/// characters.
pub fn parse_decimal(input: &str) -> Result<Decimal, AmountError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    let (negative, unsigned) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };

    let exponent: i64 = match exponent {
        Some(exp) => exp.parse().map_err(|_| AmountError::NotANumber(s.to_string()))?,
        None => 0,
    };

    let digits = mantissa.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = mantissa.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != mantissa.len() {
        return Err(AmountError::NotANumber(s.to_string()));
    }

    let mut normalized = String::with_capacity(mantissa.len() + 2);
    if mantissa.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(mantissa);
    if mantissa.ends_with('.') {
        normalized.push('0');
    }

    let value = Decimal::from_str(&normalized).map_err(|_| AmountError::OutOfRange(s.to_string()))?;
    let value = scale_by_pow10(value, exponent).ok_or_else(|| AmountError::OutOfRange(s.to_string()))?;

    Ok(if negative { -value } else { value })
}

/// Parse an amount that must be strictly positive.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let value = parse_decimal(input)?;
    if value <= Decimal::ZERO {
        return Err(AmountError::NotPositive);
    }
    Ok(value)
}

/// `round(amount * 10^decimals)` as an integer smallest-unit amount.
///
/// ```rust
/// use swap_terminal::utils::amount::to_smallest_unit;
///
/// assert_eq!(to_smallest_unit("0.1", 9).unwrap(), 100_000_000);
/// assert_eq!(to_smallest_unit("0.0000005", 6).unwrap(), 1);
/// ```
pub fn to_smallest_unit(amount: &str, decimals: u8) -> Result<u64, AmountError> {
    let value = parse_amount(amount)?;
    let scaled = scale_by_pow10(value, i64::from(decimals))
        .ok_or_else(|| AmountError::OutOfRange(amount.trim().to_string()))?;
    let rounded = scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    if rounded.is_zero() {
        return Err(AmountError::BelowSmallestUnit {
            amount: amount.trim().to_string(),
            decimals,
        });
    }

    rounded
        .to_u64()
        .ok_or_else(|| AmountError::OutOfRange(amount.trim().to_string()))
}

/// Inverse of [`to_smallest_unit`]: raw integer string to a human amount.
pub fn to_ui_amount(raw: &str, decimals: u8) -> Result<Decimal, AmountError> {
    if decimals > MAX_SCALE {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }
    let raw_value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| AmountError::NotANumber(raw.to_string()))?;

    Ok(Decimal::from_i128_with_scale(i128::from(raw_value), u32::from(decimals)))
}

/// Fixed-place rendering, zero padded (`0.1` at 4 places is `"0.1000"`).
pub fn format_ui_amount(value: Decimal, places: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded.to_string()
}

fn scale_by_pow10(value: Decimal, exponent: i64) -> Option<Decimal> {
    if value.is_zero() || exponent == 0 {
        return Some(value);
    }
    if exponent > MAX_EXPONENT {
        return None;
    }
    if exponent < -MAX_EXPONENT {
        return Some(Decimal::ZERO);
    }

    let mut scaled = value;
    if exponent > 0 {
        for _ in 0..exponent {
            scaled = scaled.checked_mul(Decimal::TEN)?;
        }
    } else {
        for _ in 0..exponent.unsigned_abs() {
            scaled = scaled.checked_div(Decimal::TEN)?;
        }
    }
    Some(scaled)
}
