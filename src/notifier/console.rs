use crate::model::SinkError;
use crate::notifier::ReportSink;
use crate::report::render::{heading, render_table, TableStyle};
use crate::report::Report;

/// Prints the report table to stdout.
pub struct ConsoleSink;

#[async_trait::async_trait]
impl ReportSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn deliver(&self, report: &Report) -> Result<(), SinkError> {
        println!("{}", heading(report));
        if report.is_empty() {
            println!("No symbols to report.");
        } else {
            println!("{}", render_table(report, TableStyle::Terminal));
        }
        Ok(())
    }
}
