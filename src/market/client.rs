use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::types::{PairsResponse, TradingPair};

const DEFAULT_MARKET_API_BASE: &str = "https://api.dexscreener.com";

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("market data request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected market data shape: {0}")]
    Format(#[from] serde_json::Error),
}

/// Anything that can produce the set of trading pairs for a token address.
/// The production implementation is [`MarketClient`]; tests substitute stubs.
#[async_trait]
pub trait PairSource: Send + Sync {
    async fn fetch_pairs(&self, address: &str) -> Result<Vec<TradingPair>, MarketError>;
}

#[derive(Debug, Clone)]
pub struct MarketClient {
    http: Client,
    base_url: String,
}

impl MarketClient {
    pub fn new(http: Client, base_url: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.unwrap_or_else(|| DEFAULT_MARKET_API_BASE.into()),
        }
    }
}

#[async_trait]
impl PairSource for MarketClient {
    /// Fetch all known trading pairs for a contract address.
    ///
    /// Transport failures (including timeout expiry) surface as `Network`;
    /// a body that does not decode as the expected schema is `Format`.
    /// An empty pair set is an Ok result, not an error.
    async fn fetch_pairs(&self, address: &str) -> Result<Vec<TradingPair>, MarketError> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, address);
        let resp = self.http.get(&url).send().await?.error_for_status()?;

        let body = resp.text().await?;
        let parsed: PairsResponse = serde_json::from_str(&body)?;

        Ok(parsed.pairs.unwrap_or_default())
    }
}
