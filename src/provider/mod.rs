/// Market data provider module
///
/// Resolves ticker symbols to company display names. The trait keeps
/// handlers and jobs independent of the concrete upstream service.
pub mod yahoo;

use async_trait::async_trait;
use thiserror::Error;

pub use yahoo::YahooFinanceProvider;

/// Provider-related errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

/// Market data lookup service, queried by ticker symbol
///
/// Returns `Ok(None)` when the provider answers but has no display name
/// for the symbol; `Err` for transport or decoding failures. The response
/// is otherwise trusted as-is.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Resolve a ticker symbol to its display name
    async fn lookup_name(&self, symbol: &str) -> Result<Option<String>, ProviderError>;
}
