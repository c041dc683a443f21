//! Rate resolution and conversion, the entry point used by the CLI.

use super::cache::RateCache;
use super::convert::{ConversionError, convert, cross_rate};
use super::rates::{FetchError, RateProvider, RateTable};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Result of a single successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
    /// Unrounded value of one unit of `from` in `to`.
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Outcome for one target of a bulk conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkConversion {
    pub to: String,
    pub result: Result<f64, ConversionError>,
    pub rate: Option<f64>,
}

pub struct RateService<P: RateProvider> {
    cache: RateCache<P>,
    decimal_places: u32,
}

impl<P: RateProvider> RateService<P> {
    pub fn new(cache: RateCache<P>, decimal_places: u32) -> Self {
        Self {
            cache,
            decimal_places,
        }
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    pub fn cache(&self) -> &RateCache<P> {
        &self.cache
    }

    /// Rate table for `base`, served from the cache while it is live.
    pub async fn get_rates(&self, base: &str) -> Result<Arc<RateTable>, FetchError> {
        self.cache.get_or_fetch(base).await
    }

    /// Converts using the rate table of the source currency.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion, ServiceError> {
        let table = self.get_rates(from).await?;
        let converted = convert(amount, from, to, &table, self.decimal_places)?;
        let rate = cross_rate(from, to, &table)?;
        debug!(amount, from, to, converted, "Converted amount");

        Ok(Conversion {
            amount,
            from: from.to_string(),
            to: to.to_string(),
            converted,
            rate,
            fetched_at: table.fetched_at(),
        })
    }

    /// Converts one amount into many targets with a single table lookup.
    /// Only a failed fetch fails the whole call; per-target failures are
    /// reported in the returned entries.
    pub async fn bulk_convert(
        &self,
        amount: f64,
        from: &str,
        targets: &[String],
    ) -> Result<Vec<BulkConversion>, FetchError> {
        let table = self.get_rates(from).await?;
        Ok(targets
            .iter()
            .map(|to| BulkConversion {
                to: to.clone(),
                result: convert(amount, from, to, &table, self.decimal_places),
                rate: cross_rate(from, to, &table).ok(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::DEFAULT_TTL;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        call_count: AtomicUsize,
    }

    #[async_trait]
    impl<'a> RateProvider for &'a StubProvider {
        async fn fetch(&self, base: &str) -> Result<RateTable, FetchError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match base {
                "USD" => Ok(RateTable::new(
                    "USD",
                    HashMap::from([
                        ("USD".to_string(), 1.0),
                        ("PKR".to_string(), 278.5),
                        ("EUR".to_string(), 0.92),
                    ]),
                    Utc::now(),
                )),
                _ => Err(FetchError::HttpError {
                    status: 404,
                    reason: "Not Found".to_string(),
                }),
            }
        }
    }

    fn stub() -> StubProvider {
        StubProvider {
            call_count: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_convert() {
        let provider = stub();
        let service = RateService::new(RateCache::new(&provider, DEFAULT_TTL), 2);

        let conversion = service.convert(100.0, "USD", "PKR").await.unwrap();
        assert_eq!(conversion.converted, 27850.0);
        assert_eq!(conversion.rate, 278.5);

        let conversion = service.convert(10.0, "USD", "EUR").await.unwrap();
        assert_eq!(conversion.converted, 9.2);
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_convert_errors() {
        let provider = stub();
        let service = RateService::new(RateCache::new(&provider, DEFAULT_TTL), 2);

        let result = service.convert(10.0, "USD", "XXX").await;
        assert!(matches!(
            result,
            Err(ServiceError::Conversion(
                ConversionError::UnsupportedCurrencyPair { .. }
            ))
        ));

        let result = service.convert(10.0, "XXX", "USD").await;
        assert!(matches!(
            result,
            Err(ServiceError::Fetch(FetchError::HttpError { status: 404, .. }))
        ));
    }

    #[tokio::test]
    async fn test_bulk_convert() {
        let provider = stub();
        let service = RateService::new(RateCache::new(&provider, DEFAULT_TTL), 2);

        let targets = vec!["PKR".to_string(), "EUR".to_string(), "GBP".to_string()];
        let results = service.bulk_convert(1000.0, "USD", &targets).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].result, Ok(278500.0));
        assert_eq!(results[0].rate, Some(278.5));
        assert_eq!(results[1].result, Ok(920.0));
        assert!(results[2].result.is_err());
        assert_eq!(results[2].rate, None);
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bulk_convert_fetch_failure() {
        let provider = stub();
        let service = RateService::new(RateCache::new(&provider, DEFAULT_TTL), 2);

        let result = service.bulk_convert(1.0, "GBP", &["USD".to_string()]).await;
        assert!(result.is_err());
        assert!(service.cache().is_empty().await);
    }
}
