use super::ui;
use crate::core::config::AppConfig;
use crate::core::format::{currency_symbol, format_timestamp};
use crate::core::validate::validate_currency_code;
use crate::core::{FetchError, RateProvider, RateService, RateTable};
use anyhow::{Result, bail};
use chrono::Local;
use comfy_table::Cell;
use futures::future::join_all;
use std::sync::Arc;

impl RateTable {
    /// Renders the rates of every supported currency against this table's base.
    pub fn display_as_table(&self, config: &AppConfig) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell("Name"),
            ui::header_cell(&format!("Rate (1 {})", self.base())),
        ]);

        for currency in config.currencies.iter() {
            if currency.code == self.base() {
                continue;
            }
            let rate_cell = self.rate(&currency.code).map_or(ui::na_cell(false), |rate| {
                ui::amount_cell(format!("{} {rate:.4}", currency_symbol(&currency.code)))
            });
            table.add_row(vec![
                Cell::new(&currency.code),
                Cell::new(&currency.name),
                rate_cell,
            ]);
        }

        format!(
            "Base: {}\n\n{}\n{}",
            ui::style_text(self.base(), ui::StyleType::Title),
            table,
            ui::style_text(
                &format!(
                    "Last updated: {}",
                    format_timestamp(&self.fetched_at().with_timezone(&Local))
                ),
                ui::StyleType::Subtle,
            )
        )
    }
}

pub async fn run<P: RateProvider>(
    service: &RateService<P>,
    config: &AppConfig,
    bases: &[String],
) -> Result<()> {
    let bases = if bases.is_empty() {
        vec![config.primary_currency.clone()]
    } else {
        bases
            .iter()
            .map(|b| validate_currency_code(b, &config.currencies))
            .collect::<Result<Vec<_>, _>>()?
    };

    let pb = ui::new_progress_bar(bases.len() as u64, true);
    pb.set_message("Fetching exchange rates...");

    let futures = bases.iter().map(|base| {
        let pb_clone = pb.clone();
        async move {
            let res = service.get_rates(base).await;
            pb_clone.inc(1);
            (base.clone(), res)
        }
    });
    let results: Vec<(String, Result<Arc<RateTable>, FetchError>)> = join_all(futures).await;
    pb.finish_and_clear();

    let total = results.len();
    let mut failures = 0;
    for (i, (base, result)) in results.into_iter().enumerate() {
        match result {
            Ok(table) => println!("{}", table.display_as_table(config)),
            Err(e) => {
                failures += 1;
                println!(
                    "{}",
                    ui::style_text(
                        &format!("Failed to fetch exchange rates for {base}: {e}"),
                        ui::StyleType::Error,
                    )
                );
            }
        }
        if i < total - 1 {
            ui::print_separator();
        }
    }

    if failures == total {
        bail!("Failed to fetch exchange rates");
    }
    Ok(())
}
