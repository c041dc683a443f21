//! Input checks run by the CLI before the conversion core is invoked.

use super::currency::CurrencySet;
use thiserror::Error;

const MAX_AMOUNT: f64 = 1e12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Parses a user-entered amount, accepting only positive finite values up to 1e12.
pub fn validate_amount(input: &str) -> Result<f64, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::new("Amount cannot be empty"));
    }

    let amount: f64 = input
        .parse()
        .ok()
        .filter(|a: &f64| a.is_finite())
        .ok_or_else(|| ValidationError::new("Please enter a valid number"))?;

    if amount < 0.0 {
        return Err(ValidationError::new("Amount cannot be negative"));
    }
    if amount == 0.0 {
        return Err(ValidationError::new("Amount must be greater than 0"));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::new("Amount is too large"));
    }
    Ok(amount)
}

/// Normalizes a currency code and checks it against the supported set.
pub fn validate_currency_code(code: &str, supported: &CurrencySet) -> Result<String, ValidationError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(ValidationError::new("Currency code cannot be empty"));
    }
    if !supported.contains(&code) {
        return Err(ValidationError(format!("Currency '{code}' is not supported")));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(" 100.5 "), Ok(100.5));
        assert_eq!(validate_amount("1e12"), Ok(1e12));

        let cases = [
            ("", "Amount cannot be empty"),
            ("   ", "Amount cannot be empty"),
            ("abc", "Please enter a valid number"),
            ("NaN", "Please enter a valid number"),
            ("inf", "Please enter a valid number"),
            ("-5", "Amount cannot be negative"),
            ("0", "Amount must be greater than 0"),
            ("1000000000001", "Amount is too large"),
        ];
        for (input, message) in cases {
            assert_eq!(
                validate_amount(input).unwrap_err().to_string(),
                message,
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_validate_currency_code() {
        let set = CurrencySet::default();
        assert_eq!(validate_currency_code(" usd ", &set), Ok("USD".to_string()));
        assert_eq!(
            validate_currency_code("", &set).unwrap_err().to_string(),
            "Currency code cannot be empty"
        );
        assert_eq!(
            validate_currency_code("xyz", &set).unwrap_err().to_string(),
            "Currency 'XYZ' is not supported"
        );
    }
}
