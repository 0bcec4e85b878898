//! Exact conversion between display amounts and integer base units.
//!
//! Display amounts are decimal strings scaled by `10^decimals`; base units
//! are the only representation the contract understands. Conversion is
//! exact in both directions. Floating point is never involved.

use alloy_primitives::{
    utils::{format_units, parse_units, ParseUnits},
    U256,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must not be negative")]
    Negative,

    #[error("invalid amount: {0}")]
    Invalid(String),
}

/// Parse a display amount into base units.
///
/// Rejects empty input, negative values, and fractional parts longer than
/// `decimals`.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    // parse_units truncates fractional digits beyond `decimals`; bound
    // them up front so the submitted value is exactly what was entered.
    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > usize::from(decimals) {
            return Err(AmountError::Invalid(format!(
                "more than {decimals} fractional digits"
            )));
        }
    }

    let parsed =
        parse_units(trimmed, decimals).map_err(|e| AmountError::Invalid(e.to_string()))?;

    match parsed {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(AmountError::Negative),
    }
}

/// Format base units as a display amount, trailing zeros trimmed.
pub fn format_amount(value: U256, decimals: u8) -> Result<String, AmountError> {
    let formatted =
        format_units(value, decimals).map_err(|e| AmountError::Invalid(e.to_string()))?;

    if !formatted.contains('.') {
        return Ok(formatted);
    }

    Ok(formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string())
}
