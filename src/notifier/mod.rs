// Report sinks: where a finished report goes.
pub mod console;
pub mod email;
pub mod telegram;

use crate::model::SinkError;
use crate::report::Report;

pub use console::ConsoleSink;
pub use email::EmailSink;
pub use telegram::TelegramNotifier;

#[async_trait::async_trait]
pub trait ReportSink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, report: &Report) -> Result<(), SinkError>;
}
