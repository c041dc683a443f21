use super::ui;
use crate::core::config::AppConfig;
use crate::core::format::format_amount;
use crate::core::service::BulkConversion;
use crate::core::validate::{validate_amount, validate_currency_code};
use crate::core::{RateProvider, RateService};
use anyhow::{Context, Result, bail};
use comfy_table::Cell;
use tracing::debug;

/// Targets to convert into: the requested codes, or every supported
/// currency except the source when none were given.
fn resolve_targets(config: &AppConfig, from: &str, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(config
            .currencies
            .codes()
            .filter(|code| *code != from)
            .map(str::to_string)
            .collect());
    }

    let mut targets = Vec::with_capacity(requested.len());
    for code in requested {
        let code = validate_currency_code(code, &config.currencies)?;
        if !targets.contains(&code) {
            targets.push(code);
        }
    }
    Ok(targets)
}

fn display_results(from: &str, results: &[BulkConversion], config: &AppConfig) -> String {
    let places = config.decimal_places as usize;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Amount"),
        ui::header_cell("Exchange Rate"),
    ]);

    for entry in results {
        let label = config
            .currencies
            .name_of(&entry.to)
            .map_or(entry.to.clone(), |name| format!("{} ({name})", entry.to));

        let amount_cell = match &entry.result {
            Ok(converted) => ui::amount_cell(format_amount(
                *converted,
                places,
                config.thousand_separator,
            )),
            Err(_) => ui::na_cell(true),
        };
        let rate_cell = entry.rate.map_or(ui::na_cell(false), |rate| {
            ui::amount_cell(format!("1 {from} = {rate:.4}"))
        });

        table.add_row(vec![Cell::new(label), amount_cell, rate_cell]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Conversion Results", ui::StyleType::Title),
        table
    )
}

pub async fn run<P: RateProvider>(
    service: &RateService<P>,
    config: &AppConfig,
    amount: &str,
    from: &str,
    to: &[String],
) -> Result<()> {
    let amount = validate_amount(amount)?;
    let from = validate_currency_code(from, &config.currencies)?;
    let targets = resolve_targets(config, &from, to)?;
    debug!(?targets, "Bulk converting {} {}", amount, from);

    if targets.is_empty() {
        println!("No target currencies selected.");
        return Ok(());
    }

    let pb = ui::new_spinner("Fetching exchange rates and converting...");
    let results = service.bulk_convert(amount, &from, &targets).await;
    pb.finish_and_clear();

    let results = results.context("Failed to fetch exchange rates")?;
    let converted = results.iter().filter(|r| r.result.is_ok()).count();
    if converted == 0 {
        bail!("Unable to convert to selected currencies");
    }

    println!("{}", display_results(&from, &results, config));
    println!(
        "\n{}",
        ui::style_text(
            &format!("Successfully converted {amount} {from} to {converted} currencies"),
            ui::StyleType::TotalValue,
        )
    );
    Ok(())
}
