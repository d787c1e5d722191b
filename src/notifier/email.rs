// notifier/email.rs

use crate::config::EmailConfig;
use crate::model::SinkError;
use crate::notifier::ReportSink;
use crate::report::render::{heading, render_email_html};
use crate::report::Report;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{info, warn};

/// Mails the report as an HTML table over STARTTLS SMTP.
pub struct EmailSink {
    from: Mailbox,
    to: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailSink {
    pub fn new(config: &EmailConfig, timeout_seconds: u64) -> Result<Self, SinkError> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .timeout(Some(Duration::from_secs(timeout_seconds)))
            .build();

        Ok(Self {
            from: config.sender().parse()?,
            to: config.recipient.parse()?,
            mailer,
        })
    }

    /// Subject line carries the report date.
    pub fn build_message(&self, report: &Report) -> Result<Message, SinkError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(heading(report))
            .header(ContentType::TEXT_HTML)
            .body(render_email_html(report))?;
        Ok(message)
    }
}

#[async_trait::async_trait]
impl ReportSink for EmailSink {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, report: &Report) -> Result<(), SinkError> {
        let message = self.build_message(report)?;
        info!("📤 Sending report email to {}...", self.to);
        match self.mailer.send(message).await {
            Ok(response) => {
                info!("✅ SMTP accepted report [{}]", response.code());
                Ok(())
            }
            Err(e) => {
                warn!("❌ SMTP send failed: {}", e);
                Err(SinkError::Smtp(e))
            }
        }
    }
}
