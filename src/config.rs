use serde::Deserialize;
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    /// Sender address; the SMTP username when absent.
    #[serde(default)]
    pub from: Option<String>,
    pub recipient: String,
}

impl EmailConfig {
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sheets_csv_url: String,
    #[serde(default = "default_symbol_column")]
    pub symbol_column: usize,
    #[serde(default = "default_true")]
    pub sheet_has_header: bool,
    #[serde(default = "default_exchange_suffix")]
    pub exchange_suffix: Option<String>,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,
    #[serde(default)]
    pub check_interval_seconds: Option<u64>,
    #[serde(default = "default_report_title")]
    pub report_title: String,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub email: Option<EmailConfig>,
}

fn default_symbol_column() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_exchange_suffix() -> Option<String> {
    Some(".TA".to_string())
}

fn default_lookback_days() -> u32 {
    12
}

fn default_fetch_concurrency() -> usize {
    1
}

fn default_http_timeout_seconds() -> u64 {
    10
}

fn default_smtp_port() -> u16 {
    587
}

fn default_report_title() -> String {
    "Weekly stock status report".to_string()
}

impl AppConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sheets_csv_url.trim().is_empty() {
            return Err(ConfigError::Invalid("sheets_csv_url is empty".into()));
        }
        // fewer calendar days than this cannot yield 8 trading days
        if self.lookback_days < 8 {
            return Err(ConfigError::Invalid(format!(
                "lookback_days must be at least 8, got {}",
                self.lookback_days
            )));
        }
        if self.fetch_concurrency == 0 {
            return Err(ConfigError::Invalid("fetch_concurrency must be at least 1".into()));
        }
        if self.http_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("http_timeout_seconds must be at least 1".into()));
        }
        if let Some(tg) = &self.telegram {
            if tg.bot_token.trim().is_empty() {
                return Err(ConfigError::Invalid("telegram.bot_token is empty".into()));
            }
        }
        if let Some(email) = &self.email {
            if email.smtp_host.trim().is_empty() || email.recipient.trim().is_empty() {
                return Err(ConfigError::Invalid("email.smtp_host and email.recipient are required".into()));
            }
            if email.password.is_empty() {
                return Err(ConfigError::Invalid("email.password is empty".into()));
            }
        }
        Ok(())
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    AppConfig::from_json(&content)
}
