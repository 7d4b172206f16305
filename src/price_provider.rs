use async_trait::async_trait;
use thiserror::Error;

/// Upstream lookup failure: network error, non-2xx status, or a response
/// body without the expected price field. The display message names the
/// requested symbol so handlers can surface it to the caller as-is.
#[derive(Debug, Error)]
#[error("Failed to fetch price for {symbol}")]
pub struct FetchError {
    pub symbol: String,
    #[source]
    pub source: anyhow::Error,
}

impl FetchError {
    pub fn new(symbol: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        FetchError {
            symbol: symbol.into(),
            source: source.into(),
        }
    }
}

#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// Fetch the current spot price for a symbol. The returned price is the
    /// upstream provider's decimal string, forwarded without parsing.
    async fn fetch_spot(&self, symbol: &str) -> Result<String, FetchError>;
}
