use super::ui;
use crate::core::config::AppConfig;
use crate::core::format::{format_currency, format_exchange_rate, format_timestamp};
use crate::core::service::Conversion;
use crate::core::validate::{validate_amount, validate_currency_code};
use crate::core::{RateProvider, RateService};
use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Cell;

impl Conversion {
    pub fn display(&self, config: &AppConfig) -> String {
        let places = config.decimal_places as usize;
        let separator = config.thousand_separator;

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("From Amount"),
            ui::header_cell(""),
            ui::header_cell("To Amount"),
        ]);
        table.add_row(vec![
            ui::amount_cell(format_currency(self.amount, &self.from, places, separator)),
            Cell::new("→"),
            ui::amount_cell(ui::style_text(
                &format_currency(self.converted, &self.to, places, separator),
                ui::StyleType::TotalValue,
            )),
        ]);

        let mut output = table.to_string();
        output.push_str(&format!(
            "\n\nExchange Rate: {}",
            format_exchange_rate(self.rate, &self.from, &self.to, places)
        ));
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!(
                    "Last updated: {}",
                    format_timestamp(&self.fetched_at.with_timezone(&Local))
                ),
                ui::StyleType::Subtle,
            )
        ));
        output
    }
}

pub async fn run<P: RateProvider>(
    service: &RateService<P>,
    config: &AppConfig,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<()> {
    let amount = validate_amount(amount)?;
    let from = validate_currency_code(from, &config.currencies)?;
    let to = validate_currency_code(to, &config.currencies)?;

    let pb = ui::new_spinner("Fetching exchange rates...");
    let result = service.convert(amount, &from, &to).await;
    pb.finish_and_clear();

    let conversion = result.context("Unable to convert")?;
    println!("{}", conversion.display(config));
    Ok(())
}
