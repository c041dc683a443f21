//! Rate tables and the provider abstraction that produces them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while fetching a rate table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The provider did not answer within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The provider could not be reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The provider answered with a non-2xx status.
    #[error("API error: {status} - {reason}")]
    HttpError { status: u16, reason: String },

    /// The body was not JSON or did not carry a `rates` mapping.
    #[error("Invalid response from API: {0}")]
    MalformedResponse(String),
}

/// Exchange rates relative to a single base currency.
///
/// The base currency is always present in `rates` with a rate of 1.0, even
/// when the provider omitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: String,
    rates: HashMap<String, f64>,
    fetched_at: DateTime<Utc>,
}

impl RateTable {
    pub fn new(base: &str, mut rates: HashMap<String, f64>, fetched_at: DateTime<Utc>) -> Self {
        rates.entry(base.to_string()).or_insert(1.0);
        Self {
            base: base.to_string(),
            rates,
            fetched_at,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rates(&self) -> &HashMap<String, f64> {
        &self.rates
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the rate table for `base`. The code is passed through unchecked.
    async fn fetch(&self, base: &str) -> Result<RateTable, FetchError>;
}
