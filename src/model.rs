// Core structs: PricePoint, PriceSeries, SymbolResult, errors
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Daily closes of a single symbol, oldest first, at most one point per date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Sorts the points by date. For a repeated date the later point wins.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Magnitude bucket of the weekly change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Up => "up >5%",
            Trend::Down => "down >5%",
            Trend::Neutral => "neutral",
        }
    }
}

pub const STREAK_MARKER: &str = "3-day up streak";
pub const LABEL_SEPARATOR: &str = " | ";

/// One report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolResult {
    pub symbol: String,
    pub pct_change: f64,
    pub trend: Trend,
    pub has_streak: bool,
}

impl SymbolResult {
    pub fn status_label(&self) -> String {
        if self.has_streak {
            format!("{}{}{}", self.trend.label(), LABEL_SEPARATOR, STREAK_MARKER)
        } else {
            self.trend.label().to_string()
        }
    }

    pub fn pct_display(&self) -> String {
        format!("{:.2}%", self.pct_change)
    }
}

/// Why a symbol got no report row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("insufficient data: {have} observations, need {need}")]
    InsufficientData { have: usize, need: usize },
    #[error("anchor price is zero")]
    ZeroAnchorPrice,
    #[error("non-finite price in series")]
    NonFinitePrice,
    #[error("provider failure: {0}")]
    Provider(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("provider error: {0}")]
    Api(String),
    #[error("no data returned")]
    Empty,
}

impl From<FetchError> for SkipReason {
    fn from(e: FetchError) -> Self {
        SkipReason::Provider(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api responded {status}: {body}")]
    Api { status: u16, body: String },
    #[error("delivery timed out")]
    Timeout,
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("cannot build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn series_is_sorted_and_deduplicated() {
        let series = PriceSeries::new(
            "LUMI",
            vec![
                PricePoint { date: day(3), close: 3.0 },
                PricePoint { date: day(1), close: 1.0 },
                PricePoint { date: day(3), close: 3.5 },
                PricePoint { date: day(2), close: 2.0 },
            ],
        );
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.5]);
        assert_eq!(series.symbol(), "LUMI");
    }

    #[test]
    fn label_appends_streak_marker() {
        let mut row = SymbolResult {
            symbol: "TEVA".into(),
            pct_change: -6.0,
            trend: Trend::Down,
            has_streak: false,
        };
        assert_eq!(row.status_label(), "down >5%");
        row.has_streak = true;
        assert_eq!(row.status_label(), "down >5% | 3-day up streak");
    }

    #[test]
    fn pct_display_has_two_decimals() {
        let row = SymbolResult {
            symbol: "ESLT".into(),
            pct_change: 20.0 / 3.0,
            trend: Trend::Up,
            has_streak: false,
        };
        assert_eq!(row.pct_display(), "6.67%");
        assert!((row.pct_change - 6.666_666).abs() < 1e-5);
    }
}
