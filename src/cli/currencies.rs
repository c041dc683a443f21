use super::ui;
use crate::core::config::AppConfig;
use crate::core::format::currency_symbol;
use comfy_table::Cell;

pub fn display_as_table(config: &AppConfig) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Symbol"),
    ]);

    for currency in config.currencies.iter() {
        let code = if currency.code == config.primary_currency {
            Cell::new(format!("{} *", currency.code))
        } else {
            Cell::new(&currency.code)
        };
        table.add_row(vec![
            code,
            Cell::new(&currency.name),
            Cell::new(currency_symbol(&currency.code)),
        ]);
    }

    format!(
        "{}\n\n{}\n{}",
        ui::style_text("Supported Currencies", ui::StyleType::Title),
        table,
        ui::style_text("* primary currency", ui::StyleType::Subtle)
    )
}

pub fn run(config: &AppConfig) {
    println!("{}", display_as_table(config));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_currency() {
        let config = AppConfig::default();
        let output = display_as_table(&config);
        for currency in config.currencies.iter() {
            assert!(output.contains(&currency.name), "missing {}", currency.name);
        }
        assert!(output.contains("PKR *"));
        assert!(output.contains("৳"));
    }
}
