pub mod config;
pub mod log;
pub mod price_provider;
pub mod providers;
pub mod server;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::price_provider::SpotPriceProvider;
use crate::providers::coinbase::CoinbaseProvider;

pub async fn run(port_override: Option<u16>) -> Result<()> {
    info!("Crypto Price Oracle starting...");

    let mut config = config::AppConfig::from_env()?;
    if let Some(port) = port_override {
        config.port = port;
    }
    debug!("Loaded config: {config:#?}");

    let provider: Arc<dyn SpotPriceProvider> =
        Arc::new(CoinbaseProvider::new(&config.upstream_base_url)?);

    server::serve(config.port, provider).await
}
