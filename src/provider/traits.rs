use crate::model::{FetchError, PricePoint};

#[async_trait::async_trait]
pub trait PriceProvider: Send + Sync {
    /// Daily closes of `ticker` covering the last `lookback_days` calendar days.
    async fn fetch_prices(&self, ticker: &str, lookback_days: u32) -> Result<Vec<PricePoint>, FetchError>;
}
