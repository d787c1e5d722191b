/// Number of observations between the current close and the anchor close, inclusive of the anchor.
pub const WEEK_OBSERVATIONS: usize = 7;
pub const STREAK_LEN: usize = 3;

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Percent change from the 7th-from-last close to the last close.
    /// `None` when the series is too short or the anchor is zero.
    pub fn weekly_change(closes: &[f64]) -> Option<f64> {
        if closes.len() < WEEK_OBSERVATIONS {
            return None;
        }
        let last = closes.len() - 1;
        let price_now = closes[last];
        let price_week_ago = closes[last - (WEEK_OBSERVATIONS - 1)];
        if price_week_ago == 0.0 {
            return None;
        }
        Some((price_now - price_week_ago) / price_week_ago * 100.0)
    }

    /// `close[i] > close[i-1]` for every adjacent pair; one shorter than the input.
    pub fn daily_up(closes: &[f64]) -> Vec<bool> {
        closes.windows(2).map(|w| w[1] - w[0] > 0.0).collect()
    }

    /// Keeps the last `n` entries.
    pub fn trailing<T>(values: &[T], n: usize) -> &[T] {
        &values[values.len().saturating_sub(n)..]
    }

    /// True if some run of `len` consecutive entries is all up. No padding.
    pub fn has_up_run(ups: &[bool], len: usize) -> bool {
        if len == 0 || ups.len() < len {
            return false;
        }
        ups.windows(len).any(|w| w.iter().all(|&up| up))
    }

    /// Streak over the trailing week: the last 7 up/down flags, i.e. the last 8 closes.
    pub fn weekly_streak(closes: &[f64]) -> bool {
        let ups = Self::daily_up(closes);
        Self::has_up_run(Self::trailing(&ups, WEEK_OBSERVATIONS), STREAK_LEN)
    }
}
