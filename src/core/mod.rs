//! Rate resolution, conversion and the supporting domain types

pub mod cache;
pub mod config;
pub mod convert;
pub mod currency;
pub mod format;
pub mod history;
pub mod log;
pub mod rates;
pub mod service;
pub mod validate;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use convert::{ConversionError, convert};
pub use currency::{CurrencySet, SupportedCurrency};
pub use rates::{FetchError, RateProvider, RateTable};
pub use service::{RateService, ServiceError};
