//! Terminal front-end for the conversion service

pub mod bulk;
pub mod convert;
pub mod currencies;
pub mod rates;
pub mod session;
pub mod setup;
pub mod ui;
