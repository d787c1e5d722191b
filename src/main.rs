mod config;
mod model;
mod source;
mod provider;
mod analyzer;
mod normalizer;
mod notifier;
mod report;
mod utils;

use analyzer::{Analyzer, AnalyzerImpl};
use config::{load_config, AppConfig};
use futures::stream::{self, StreamExt};
use model::{PriceSeries, SkipReason, SymbolResult};
use normalizer::to_ticker;
use notifier::{ConsoleSink, EmailSink, ReportSink, TelegramNotifier};
use provider::{PriceProvider, YahooProvider};
use report::Report;
use source::{SheetSource, SymbolSource};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("❌ Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let source = match SheetSource::new(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("❌ Failed to initialize symbol source: {}", e);
            return;
        }
    };
    let provider = match YahooProvider::new(config.http_timeout_seconds) {
        Ok(p) => p,
        Err(e) => {
            error!("❌ Failed to initialize price provider: {}", e);
            return;
        }
    };
    let analyzer = AnalyzerImpl::new();

    let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(ConsoleSink)];
    if let Some(tg) = &config.telegram {
        match TelegramNotifier::new(tg, config.http_timeout_seconds) {
            Ok(n) => sinks.push(Box::new(n)),
            Err(e) => warn!("❌ Telegram disabled: {}", e),
        }
    }
    if let Some(email) = &config.email {
        match EmailSink::new(email, config.http_timeout_seconds) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(e) => warn!("❌ Email disabled: {}", e),
        }
    }

    loop {
        run_once(&config, &source, &provider, &analyzer, &sinks).await;

        let Some(interval) = config.check_interval_seconds else {
            break;
        };
        info!("⏳ Waiting {}s for the next run...", interval);
        sleep(Duration::from_secs(interval)).await;
    }
}

/// One full pass: symbols, analysis, delivery. Returns the report that was built.
async fn run_once<A: Analyzer>(
    config: &AppConfig,
    source: &dyn SymbolSource,
    provider: &dyn PriceProvider,
    analyzer: &A,
    sinks: &[Box<dyn ReportSink>],
) -> Option<Report> {
    let symbols = source.fetch_symbols().await;
    if symbols.is_empty() {
        info!("ℹ️ No symbols to analyze.");
        return None;
    }

    let report = analyze_portfolio(symbols, provider, analyzer, config).await;

    for sink in sinks {
        info!("📤 Delivering report via {}...", sink.name());
        match sink.deliver(&report).await {
            Ok(()) => info!("✅ Report delivered via {}.", sink.name()),
            Err(e) => warn!("❌ Delivery via {} failed: {}", sink.name(), e),
        }
    }

    Some(report)
}

/// Fetches and analyzes every symbol. Rows keep the input order even when fetches overlap.
async fn analyze_portfolio<A: Analyzer>(
    symbols: Vec<String>,
    provider: &dyn PriceProvider,
    analyzer: &A,
    config: &AppConfig,
) -> Report {
    info!("🔍 Analyzing {} symbols...", symbols.len());

    let outcomes: Vec<(String, Result<SymbolResult, SkipReason>)> = stream::iter(symbols)
        .map(move |symbol| async move {
            let outcome = analyze_symbol(&symbol, provider, analyzer, config).await;
            (symbol, outcome)
        })
        .buffered(config.fetch_concurrency)
        .collect()
        .await;

    let total = outcomes.len();
    let report = report::build(&config.report_title, outcomes);
    info!(
        "📊 Report ready: {} rows, {} skipped",
        report.rows.len(),
        total - report.rows.len()
    );
    debug!("Report rows: {:?}", report.symbols());
    report
}

async fn analyze_symbol<A: Analyzer>(
    symbol: &str,
    provider: &dyn PriceProvider,
    analyzer: &A,
    config: &AppConfig,
) -> Result<SymbolResult, SkipReason> {
    let ticker = to_ticker(symbol, config.exchange_suffix.as_deref());
    debug!("Fetching {} ({} days)", ticker, config.lookback_days);

    let points = provider.fetch_prices(&ticker, config.lookback_days).await?;
    let series = PriceSeries::new(symbol, points);
    debug!("{}: {} closes, latest {:?}", symbol, series.len(), series.points().last());
    let result = analyzer.analyze(&series)?;

    info!(
        "{}: {} | {}",
        result.symbol,
        result.pct_display(),
        result.status_label()
    );
    Ok(result)
}
