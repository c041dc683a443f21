//! In-memory log of the conversions made during one session.

use super::format::format_timestamp;
use chrono::{DateTime, Local};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub converted: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStats {
    pub total_conversions: usize,
    pub unique_from: usize,
    pub unique_to: usize,
    pub total_amount: f64,
}

#[derive(Debug, Default)]
pub struct ConversionHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, from: &str, to: &str, amount: f64, converted: f64, rate: f64) {
        self.entries.push(HistoryEntry {
            timestamp: Local::now(),
            from: from.to_string(),
            to: to.to_string(),
            amount,
            converted,
            rate,
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> HistoryStats {
        let unique_from: HashSet<&str> = self.entries.iter().map(|e| e.from.as_str()).collect();
        let unique_to: HashSet<&str> = self.entries.iter().map(|e| e.to.as_str()).collect();

        HistoryStats {
            total_conversions: self.entries.len(),
            unique_from: unique_from.len(),
            unique_to: unique_to.len(),
            total_amount: self.entries.iter().map(|e| e.amount).sum(),
        }
    }

    /// Renders the history as CSV with a header row.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("Time,From,To,Amount,Converted,Rate\n");
        for e in &self.entries {
            csv.push_str(&format!(
                "{},{},{},{:.2},{:.2},{:.4}\n",
                format_timestamp(&e.timestamp),
                e.from,
                e.to,
                e.amount,
                e.converted,
                e.rate
            ));
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> ConversionHistory {
        let mut history = ConversionHistory::new();
        history.record("USD", "PKR", 100.0, 27850.0, 278.5);
        history.record("USD", "EUR", 50.0, 46.0, 0.92);
        history.record("PKR", "EUR", 100.0, 0.33, 0.0033);
        history
    }

    #[test]
    fn test_stats() {
        let history = sample_history();
        let stats = history.stats();
        assert_eq!(stats.total_conversions, 3);
        assert_eq!(stats.unique_from, 2);
        assert_eq!(stats.unique_to, 2);
        assert_eq!(stats.total_amount, 250.0);
    }

    #[test]
    fn test_empty_history() {
        let mut history = sample_history();
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.stats().total_conversions, 0);
        assert_eq!(history.to_csv(), "Time,From,To,Amount,Converted,Rate\n");
    }

    #[test]
    fn test_to_csv() {
        let history = sample_history();
        let csv = history.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with(",USD,PKR,100.00,27850.00,278.5000"));
        assert!(lines[3].ends_with(",PKR,EUR,100.00,0.33,0.0033"));
    }
}
