// Report Builder: ordered rows of analyzed symbols
pub mod render;

use crate::model::{SkipReason, SymbolResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<SymbolResult>,
}

impl Report {
    pub fn symbols(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.symbol.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Accumulates per-symbol outcomes in arrival order.
pub struct ReportBuilder {
    title: String,
    rows: Vec<SymbolResult>,
}

impl ReportBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, symbol: &str, outcome: Result<SymbolResult, SkipReason>) {
        match outcome {
            Ok(row) => self.rows.push(row),
            Err(reason) => warn!("⚠️ Skipping {}: {}", symbol, reason),
        }
    }

    pub fn finish(self) -> Report {
        Report {
            title: self.title,
            generated_at: Utc::now(),
            rows: self.rows,
        }
    }
}

/// Drops skipped symbols and keeps the order of the rest.
pub fn build<I, S>(title: &str, results: I) -> Report
where
    I: IntoIterator<Item = (S, Result<SymbolResult, SkipReason>)>,
    S: AsRef<str>,
{
    let mut builder = ReportBuilder::new(title);
    for (symbol, outcome) in results {
        builder.push(symbol.as_ref(), outcome);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Trend;

    fn row(symbol: &str, pct_change: f64) -> SymbolResult {
        SymbolResult {
            symbol: symbol.to_string(),
            pct_change,
            trend: Trend::Neutral,
            has_streak: false,
        }
    }

    #[test]
    fn skipped_symbols_are_absent() {
        let report = build(
            "weekly",
            vec![
                ("AAA", Ok(row("AAA", 1.0))),
                ("BBB", Err(SkipReason::InsufficientData { have: 3, need: 8 })),
                ("CCC", Ok(row("CCC", -2.0))),
            ],
        );
        assert_eq!(report.symbols(), vec!["AAA", "CCC"]);
    }

    #[test]
    fn duplicates_are_not_merged() {
        let report = build(
            "weekly",
            vec![("AAA", Ok::<_, SkipReason>(row("AAA", 1.0))), ("AAA", Ok(row("AAA", 1.0)))],
        );
        assert_eq!(report.rows.len(), 2);
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let empty: Vec<(&str, Result<SymbolResult, SkipReason>)> = Vec::new();
        let report = build("weekly", empty);
        assert!(report.is_empty());
        assert_eq!(report.title, "weekly");
    }

    #[test]
    fn builder_keeps_only_analyzed_rows() {
        let mut builder = ReportBuilder::new("weekly");
        builder.push("AAA", Err(SkipReason::ZeroAnchorPrice));
        builder.push("BBB", Err(SkipReason::Provider("timeout".into())));
        builder.push("CCC", Ok(row("CCC", 0.0)));
        assert_eq!(builder.finish().symbols(), vec!["CCC"]);
    }
}
