use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::market::TradingPair;

/// Prompt input for the insight generator. A fixed-shape projection of the
/// selected pair (market flow) or the verbatim risk payload (risk flow).
/// Never carries secrets or user identity.
#[derive(Debug, Clone)]
pub enum InsightBrief {
    Market(MarketBrief),
    Risk(Value),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBrief {
    pub ca: String,
    pub chain: Option<String>,
    pub base: Option<String>,
    pub quote: Option<String>,
    pub dex: Option<String>,
    pub price_usd: Option<Decimal>,
    #[serde(rename = "change24h")]
    pub change_24h: Option<Decimal>,
    #[serde(rename = "volume24h")]
    pub volume_24h: Option<Decimal>,
    pub liquidity_usd: Option<Decimal>,
    #[serde(rename = "txns24h")]
    pub txns_24h: TxnBrief,
}

#[derive(Debug, Clone, Serialize)]
pub struct TxnBrief {
    pub buys: Option<i64>,
    pub sells: Option<i64>,
}

impl MarketBrief {
    pub fn from_pair(address: &str, chain: Option<&str>, pair: &TradingPair) -> Self {
        let (buys, sells) = pair.txns_h24();
        Self {
            ca: address.to_string(),
            chain: chain.map(str::to_string),
            base: pair.base_symbol().map(str::to_string),
            quote: pair.quote_symbol().map(str::to_string),
            dex: pair.dex_id.clone(),
            price_usd: pair.price_usd,
            change_24h: pair.change_h24(),
            volume_24h: pair.volume.as_ref().and_then(|v| v.h24),
            liquidity_usd: pair.liquidity.as_ref().and_then(|l| l.usd),
            txns_24h: TxnBrief { buys, sells },
        }
    }
}
