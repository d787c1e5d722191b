pub mod traits;
pub mod yahoo;

pub use traits::PriceProvider;
pub use yahoo::YahooProvider;
