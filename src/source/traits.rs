#[async_trait::async_trait]
pub trait SymbolSource: Send + Sync {
    /// Ordered symbols to analyze. Failures are logged and yield an empty list.
    async fn fetch_symbols(&self) -> Vec<String>;
}
