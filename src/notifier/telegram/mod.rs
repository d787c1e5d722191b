pub mod sender;

use crate::config::TelegramConfig;
use crate::model::SinkError;
use crate::notifier::ReportSink;
use crate::report::render::render_telegram_html;
use crate::report::Report;
use reqwest::Client;
use std::time::Duration;

/// Rows per message; keeps each `<pre>` block under Telegram's 4096 character limit.
pub const ROWS_PER_MESSAGE: usize = 25;

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: i64,
    pub client: Client,
    pub timeout_seconds: u64,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, timeout_seconds: u64) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id,
            client,
            timeout_seconds,
        })
    }

    pub async fn notify_text(&self, html: &str) -> Result<(), SinkError> {
        sender::send_html(self, html).await
    }
}

/// Splits a report into parts of at most `rows_per_part` rows. An empty report stays one part.
pub fn split_report(report: &Report, rows_per_part: usize) -> Vec<Report> {
    if report.rows.is_empty() || rows_per_part == 0 {
        return vec![report.clone()];
    }
    report
        .rows
        .chunks(rows_per_part)
        .map(|rows| Report {
            title: report.title.clone(),
            generated_at: report.generated_at,
            rows: rows.to_vec(),
        })
        .collect()
}

#[async_trait::async_trait]
impl ReportSink for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn deliver(&self, report: &Report) -> Result<(), SinkError> {
        for part in split_report(report, ROWS_PER_MESSAGE) {
            self.notify_text(&render_telegram_html(&part)).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SymbolResult, Trend};
    use chrono::Utc;

    fn report(n: usize) -> Report {
        Report {
            title: "Weekly".into(),
            generated_at: Utc::now(),
            rows: (0..n)
                .map(|i| SymbolResult {
                    symbol: format!("S{:03}", i),
                    pct_change: i as f64,
                    trend: Trend::Neutral,
                    has_streak: false,
                })
                .collect(),
        }
    }

    #[test]
    fn splits_into_ordered_parts() {
        let parts = split_report(&report(60), 25);
        assert_eq!(parts.iter().map(|p| p.rows.len()).collect::<Vec<_>>(), vec![25, 25, 10]);
        assert_eq!(parts[1].rows[0].symbol, "S025");
    }

    #[test]
    fn empty_report_is_single_part() {
        assert_eq!(split_report(&report(0), 25).len(), 1);
    }

    #[test]
    fn full_part_fits_in_one_message() {
        let html = render_telegram_html(&split_report(&report(ROWS_PER_MESSAGE), ROWS_PER_MESSAGE)[0]);
        assert!(html.chars().count() < 4096);
    }

    #[test]
    fn builds_from_config() {
        let cfg = TelegramConfig {
            bot_token: "123:abc".into(),
            chat_id: 42,
        };
        let notifier = TelegramNotifier::new(&cfg, 5).unwrap();
        assert_eq!(notifier.chat_id, 42);
        assert_eq!(notifier.name(), "telegram");
    }
}
