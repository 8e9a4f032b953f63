use async_trait::async_trait;
use serde::Deserialize;

use super::{MarketDataProvider, ProviderError};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance quote lookup
///
/// Queries the v7 quote endpoint and extracts `longName` from the first
/// result. No schema validation beyond that field.
pub struct YahooFinanceProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooFinanceProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider against a custom base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a provider from environment configuration
    ///
    /// `PROVIDER_BASE_URL` overrides the default Yahoo Finance endpoint.
    pub fn from_env() -> Self {
        match std::env::var("PROVIDER_BASE_URL") {
            Ok(url) => Self::with_base_url(url),
            Err(_) => Self::new(),
        }
    }
}

impl Default for YahooFinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponse,
}

#[derive(Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<Quote>,
}

#[derive(Deserialize)]
struct Quote {
    #[serde(rename = "longName")]
    long_name: Option<String>,
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    async fn lookup_name(&self, symbol: &str) -> Result<Option<String>, ProviderError> {
        let url = format!("{}/v7/finance/quote", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbol)])
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await?
            .error_for_status()?;

        let data: QuoteEnvelope = response.json().await?;

        Ok(data
            .quote_response
            .result
            .into_iter()
            .next()
            .and_then(|quote| quote.long_name))
    }
}
