use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::price_provider::{FetchError, SpotPriceProvider};

// CoinbaseProvider implementation for SpotPriceProvider
pub struct CoinbaseProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinbaseProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        // Client built once so reqwest's connection pool is reused
        // across requests.
        let client = reqwest::Client::builder()
            .user_agent(concat!("spot-oracle/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(CoinbaseProvider {
            base_url: base_url.to_string(),
            client,
        })
    }
}

#[derive(Deserialize, Debug)]
struct SpotResponse {
    data: SpotData,
}

#[derive(Deserialize, Debug)]
struct SpotData {
    amount: String,
}

#[async_trait]
impl SpotPriceProvider for CoinbaseProvider {
    #[instrument(
        name = "CoinbaseSpotFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_spot(&self, symbol: &str) -> Result<String, FetchError> {
        let symbol = symbol.to_uppercase();
        let url = format!("{}/v2/prices/{}-USD/spot", self.base_url, symbol);
        debug!("Requesting spot price from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::new(&symbol, anyhow!("Request error: {} URL: {}", e, url)))?;

        if !response.status().is_success() {
            return Err(FetchError::new(
                &symbol,
                anyhow!("HTTP error: {} URL: {}", response.status(), url),
            ));
        }

        let data = response
            .json::<SpotResponse>()
            .await
            .map_err(|e| FetchError::new(&symbol, anyhow!("Malformed response body: {}", e)))?;

        debug!(amount = %data.data.amount, "Received spot price");
        Ok(data.data.amount)
    }
}
