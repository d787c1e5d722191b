// Analyzer module: weekly change and streak indicators for one price series.

pub mod price_analysis;
pub mod market_indicators;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, AnalyzerImpl};
