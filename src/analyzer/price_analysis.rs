use crate::analyzer::market_indicators::{MarketAnalyzer, WEEK_OBSERVATIONS};
use crate::model::{PriceSeries, SkipReason, SymbolResult, Trend};

/// Minimum number of closes: the trailing week of up/down flags needs one extra close.
pub const MIN_OBSERVATIONS: usize = WEEK_OBSERVATIONS + 1;
pub const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Trait defining the interface for a price series analyzer.
pub trait Analyzer {
    fn analyze(&self, series: &PriceSeries) -> Result<SymbolResult, SkipReason>;
}

/// Weekly change + streak analyzer.
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(pct_change: f64) -> Trend {
        if pct_change > TREND_THRESHOLD_PCT {
            Trend::Up
        } else if pct_change < -TREND_THRESHOLD_PCT {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}

impl Analyzer for AnalyzerImpl {
    fn analyze(&self, series: &PriceSeries) -> Result<SymbolResult, SkipReason> {
        if series.len() < MIN_OBSERVATIONS {
            return Err(SkipReason::InsufficientData {
                have: series.len(),
                need: MIN_OBSERVATIONS,
            });
        }

        let closes = series.closes();
        if !closes.iter().all(|c| c.is_finite()) {
            return Err(SkipReason::NonFinitePrice);
        }
        let pct_change = MarketAnalyzer::weekly_change(&closes).ok_or(SkipReason::ZeroAnchorPrice)?;
        let has_streak = MarketAnalyzer::weekly_streak(&closes);

        Ok(SymbolResult {
            symbol: series.symbol().to_string(),
            pct_change,
            trend: Self::classify(pct_change),
            has_streak,
        })
    }
}
