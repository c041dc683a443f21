//! Pivot conversion through a rate table's base currency.

use super::rates::RateTable;
use thiserror::Error;

pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Errors that can occur while converting with a rate table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The table holds a rate that is negative or not a finite number.
    #[error("Invalid rate table")]
    InvalidTable,

    #[error("Unsupported currency pair: {from} -> {to}")]
    UnsupportedCurrencyPair { from: String, to: String },

    /// The source currency has a zero rate in the table.
    #[error("Division by zero: rate for {0} is 0")]
    DivisionByZero(String),
}

/// Converts `amount` from one currency to another, rounding the result to
/// `decimal_places` (half away from zero).
///
/// Converting a currency to itself returns `amount` untouched, without
/// consulting the table.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    table: &RateTable,
    decimal_places: u32,
) -> Result<f64, ConversionError> {
    if from == to {
        return Ok(amount);
    }
    let converted = pivot(amount, from, to, table)?;
    Ok(round_to(converted, decimal_places))
}

/// Returns the unrounded value of one unit of `from` expressed in `to`.
pub fn cross_rate(from: &str, to: &str, table: &RateTable) -> Result<f64, ConversionError> {
    if from == to {
        return Ok(1.0);
    }
    pivot(1.0, from, to, table)
}

/// Rounds half away from zero. Precisions beyond what an f64 can hold leave
/// `value` untouched.
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let Ok(exponent) = i32::try_from(decimal_places) else {
        return value;
    };
    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

fn pivot(amount: f64, from: &str, to: &str, table: &RateTable) -> Result<f64, ConversionError> {
    if table
        .rates()
        .values()
        .any(|rate| !rate.is_finite() || *rate < 0.0)
    {
        return Err(ConversionError::InvalidTable);
    }

    let unsupported = || ConversionError::UnsupportedCurrencyPair {
        from: from.to_string(),
        to: to.to_string(),
    };

    if from == table.base() {
        let to_rate = table.rate(to).ok_or_else(unsupported)?;
        return Ok(amount * to_rate);
    }

    let from_rate = table.rate(from).ok_or_else(unsupported)?;
    if from_rate == 0.0 {
        return Err(ConversionError::DivisionByZero(from.to_string()));
    }
    let base_amount = amount / from_rate;

    let to_rate = table.rate(to).ok_or_else(unsupported)?;
    Ok(base_amount * to_rate)
}
