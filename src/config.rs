use anyhow::{Context, Result};
use tracing::debug;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.coinbase.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on (`PORT`, default 4000).
    pub port: u16,
    /// Base URL of the upstream spot price API (`UPSTREAM_BASE_URL`).
    pub upstream_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        debug!("Loading config from environment");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let upstream_base_url = lookup("UPSTREAM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string());

        Ok(AppConfig {
            port,
            upstream_base_url,
        })
    }
}
