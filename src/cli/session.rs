use super::ui;
use crate::core::config::AppConfig;
use crate::core::format::{format_amount, format_currency, format_timestamp};
use crate::core::history::ConversionHistory;
use crate::core::validate::{validate_amount, validate_currency_code};
use crate::core::{RateProvider, RateService};
use anyhow::{Context, Result, anyhow};
use comfy_table::Cell;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

#[derive(Debug)]
struct Request {
    amount: f64,
    from: String,
    to: String,
}

/// Parses an `AMOUNT FROM TO` line.
fn parse_request(line: &str, config: &AppConfig) -> Result<Request> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [amount, from, to] = parts.as_slice() else {
        return Err(anyhow!("Expected 'AMOUNT FROM TO', got '{line}'"));
    };

    Ok(Request {
        amount: validate_amount(amount)?,
        from: validate_currency_code(from, &config.currencies)?,
        to: validate_currency_code(to, &config.currencies)?,
    })
}

impl ConversionHistory {
    pub fn display_as_table(&self, config: &AppConfig) -> String {
        if self.is_empty() {
            return "No conversions yet.".to_string();
        }

        let places = config.decimal_places as usize;
        let separator = config.thousand_separator;
        let stats = self.stats();

        let mut summary = ui::new_styled_table();
        summary.set_header(vec![
            ui::header_cell("Total Conversions"),
            ui::header_cell("Unique From Currencies"),
            ui::header_cell("Unique To Currencies"),
            ui::header_cell("Total Amount Converted"),
        ]);
        summary.add_row(vec![
            ui::amount_cell(stats.total_conversions.to_string()),
            ui::amount_cell(stats.unique_from.to_string()),
            ui::amount_cell(stats.unique_to.to_string()),
            ui::amount_cell(format_amount(stats.total_amount, places, separator)),
        ]);

        let mut records = ui::new_styled_table();
        records.set_header(vec![
            ui::header_cell("Time"),
            ui::header_cell("From"),
            ui::header_cell("To"),
            ui::header_cell("Amount"),
            ui::header_cell("Converted"),
            ui::header_cell("Rate"),
        ]);
        for entry in self.entries() {
            records.add_row(vec![
                Cell::new(format_timestamp(&entry.timestamp)),
                Cell::new(&entry.from),
                Cell::new(&entry.to),
                ui::amount_cell(format_amount(entry.amount, places, separator)),
                ui::amount_cell(format_amount(entry.converted, places, separator)),
                ui::amount_cell(format!("{:.4}", entry.rate)),
            ]);
        }

        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            ui::style_text("Conversion History", ui::StyleType::Title),
            summary,
            ui::style_text("Conversion Records", ui::StyleType::TotalLabel),
            records
        )
    }
}

/// Converts one `AMOUNT FROM TO` request per input line, then prints the
/// session history. Bad lines are reported and skipped; blank lines and
/// lines starting with `#` are ignored.
pub async fn run<P, R>(
    service: &RateService<P>,
    config: &AppConfig,
    reader: R,
    export: Option<&Path>,
) -> Result<ConversionHistory>
where
    P: RateProvider,
    R: AsyncBufRead + Unpin,
{
    let places = config.decimal_places as usize;
    let separator = config.thousand_separator;
    let mut history = ConversionHistory::new();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let request = match parse_request(line, config) {
            Ok(request) => request,
            Err(e) => {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
                continue;
            }
        };

        match service
            .convert(request.amount, &request.from, &request.to)
            .await
        {
            Ok(conversion) => {
                println!(
                    "{} → {}",
                    format_currency(conversion.amount, &conversion.from, places, separator),
                    ui::style_text(
                        &format_currency(conversion.converted, &conversion.to, places, separator),
                        ui::StyleType::TotalValue,
                    )
                );
                history.record(
                    &conversion.from,
                    &conversion.to,
                    conversion.amount,
                    conversion.converted,
                    conversion.rate,
                );
            }
            Err(e) => {
                debug!(error = %e, line, "Conversion failed");
                println!(
                    "{}",
                    ui::style_text(&format!("Unable to convert '{line}': {e}"), ui::StyleType::Error)
                );
            }
        }
    }

    ui::print_separator();
    println!("{}", history.display_as_table(config));

    if let Some(path) = export {
        std::fs::write(path, history.to_csv())
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
        println!("History exported to {}", path.display());
    }

    Ok(history)
}
