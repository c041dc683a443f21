//! The configured set of supported currencies

use serde::{Deserialize, Serialize};

pub const PRIMARY_CURRENCY: &str = "PKR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedCurrency {
    pub code: String,
    pub name: String,
}

impl SupportedCurrency {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    /// Label used in menus and tables, e.g. `USD - US Dollar`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Ordered list of currencies the CLI accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencySet(Vec<SupportedCurrency>);

impl CurrencySet {
    pub fn new(currencies: Vec<SupportedCurrency>) -> Self {
        Self(currencies)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c.code == code)
    }

    pub fn get(&self, code: &str) -> Option<&SupportedCurrency> {
        self.0.iter().find(|c| c.code == code)
    }

    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.get(code).map(|c| c.name.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupportedCurrency> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CurrencySet {
    fn default() -> Self {
        Self(vec![
            SupportedCurrency::new("PKR", "Pakistani Rupee"),
            SupportedCurrency::new("USD", "US Dollar"),
            SupportedCurrency::new("EUR", "Euro"),
            SupportedCurrency::new("GBP", "British Pound"),
            SupportedCurrency::new("AED", "UAE Dirham"),
            SupportedCurrency::new("SAR", "Saudi Riyal"),
            SupportedCurrency::new("INR", "Indian Rupee"),
            SupportedCurrency::new("CAD", "Canadian Dollar"),
            SupportedCurrency::new("AUD", "Australian Dollar"),
            SupportedCurrency::new("CNY", "Chinese Yuan"),
            SupportedCurrency::new("JPY", "Japanese Yen"),
            SupportedCurrency::new("BDT", "Bangladeshi Taka"),
        ])
    }
}
