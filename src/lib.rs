pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{RateCache, RateService};
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Bulk {
        amount: String,
        from: String,
        to: Vec<String>,
    },
    Rates {
        bases: Vec<String>,
    },
    Currencies,
    Session {
        export: Option<PathBuf>,
    },
}

/// Wires the HTTP provider, rate cache and conversion service from config.
pub fn build_service(config: &AppConfig) -> Result<RateService<ExchangeRateApiProvider>> {
    let provider = ExchangeRateApiProvider::new(&config.api.base_url, config.api_timeout())?;
    let cache = RateCache::new(provider, config.cache_ttl());
    Ok(RateService::new(cache, config.decimal_places))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let service = build_service(&config)?;

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&service, &config, &amount, &from, &to).await
        }
        AppCommand::Bulk { amount, from, to } => {
            cli::bulk::run(&service, &config, &amount, &from, &to).await
        }
        AppCommand::Rates { bases } => cli::rates::run(&service, &config, &bases).await,
        AppCommand::Currencies => {
            cli::currencies::run(&config);
            Ok(())
        }
        AppCommand::Session { export } => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            cli::session::run(&service, &config, stdin, export.as_deref())
                .await
                .map(|_| ())
        }
    }
}
