//! Conversion between human decimal text and base units.

use core::fmt;

use ink::prelude::string::{String, ToString};
use primitive_types::U256;

use crate::model::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitsError {
    Empty,
    InvalidCharacter,
    TooManyFractionalDigits,
    Overflow,
}

impl fmt::Display for UnitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UnitsError::Empty => "no digits",
            UnitsError::InvalidCharacter => "invalid character in amount",
            UnitsError::TooManyFractionalDigits => "more fractional digits than decimals",
            UnitsError::Overflow => "amount does not fit in 256 bits",
        };
        f.write_str(msg)
    }
}

/// Parses `"12.5"` into base units at `decimals` fractional digits.
pub fn parse_units(text: &str, decimals: u8) -> Result<Amount, UnitsError> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(UnitsError::Empty)
    }
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooManyFractionalDigits)
    }

    let mut value = U256::zero();
    for ch in whole.chars().chain(fraction.chars()) {
        let digit = ch.to_digit(10).ok_or(UnitsError::InvalidCharacter)?;
        value = push_digit(value, digit)?;
    }
    for _ in fraction.len()..decimals as usize {
        value = push_digit(value, 0)?;
    }
    Ok(Amount::from(value))
}

/// Renders base units as decimal text, keeping at least one fractional digit.
pub fn format_units(amount: Amount, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits + ".0"
    }

    let mut padded = String::new();
    for _ in digits.len()..=decimals {
        padded.push('0');
    }
    padded.push_str(&digits);

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    let mut out = String::from(whole);
    out.push('.');
    out.push_str(fraction);
    out
}

fn push_digit(value: U256, digit: u32) -> Result<U256, UnitsError> {
    value
        .checked_mul(U256::from(10u8))
        .and_then(|shifted| shifted.checked_add(U256::from(digit)))
        .ok_or(UnitsError::Overflow)
}
