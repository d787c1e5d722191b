// notifier/telegram/sender.rs

use crate::model::SinkError;
use crate::notifier::telegram::TelegramNotifier;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Sends an HTML-formatted message via Telegram.
pub async fn send_html(notifier: &TelegramNotifier, html: &str) -> Result<(), SinkError> {
    let url = format!("https://api.telegram.org/bot{}/sendMessage", notifier.bot_token);
    let params = [
        ("chat_id", notifier.chat_id.to_string()),
        ("text", html.to_string()),
        ("parse_mode", "HTML".to_string()),
    ];
    let response = match timeout(
        Duration::from_secs(notifier.timeout_seconds),
        notifier.client.post(&url).form(&params).send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("❌ Telegram send() failed: {}", e);
            return Err(SinkError::Http(e));
        }
        Err(_) => {
            warn!("⏳ Telegram send() timed out");
            return Err(SinkError::Timeout);
        }
    };
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ Telegram API responded [{}]: {}", status, body);
        return Err(SinkError::Api {
            status: status.as_u16(),
            body,
        });
    }
    info!("✅ Telegram message sent [{}]", status);
    Ok(())
}
