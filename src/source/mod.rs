pub mod sheets;
pub mod traits;

pub use sheets::SheetSource;
pub use traits::SymbolSource;
