//! Display helpers for amounts, rates and timestamps.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Formats `amount` with a fixed number of decimals, optionally grouping
/// thousands with commas.
pub fn format_amount(amount: f64, decimal_places: usize, thousand_separator: bool) -> String {
    let plain = format!("{:.*}", decimal_places, amount.abs());
    let sign = if amount < 0.0 && plain.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if !thousand_separator {
        return format!("{sign}{plain}");
    }

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `USD 1,234.50`
pub fn format_currency(
    amount: f64,
    code: &str,
    decimal_places: usize,
    thousand_separator: bool,
) -> String {
    format!(
        "{code} {}",
        format_amount(amount, decimal_places, thousand_separator)
    )
}

/// `1 USD = 278.50 PKR`
pub fn format_exchange_rate(rate: f64, from: &str, to: &str, decimal_places: usize) -> String {
    format!("1 {from} = {rate:.decimal_places$} {to}")
}

pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn currency_symbol(code: &str) -> &str {
    match code {
        "PKR" => "₨",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "AED" => "د.إ",
        "SAR" => "﷼",
        "INR" => "₹",
        "CAD" => "C$",
        "AUD" => "A$",
        "CNY" | "JPY" => "¥",
        "BDT" => "৳",
        other => other,
    }
}
