use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One venue/pool for a token as reported by the market data aggregator.
///
/// Every numeric field may be absent from an upstream record; accessors
/// below coalesce to zero only where an ordering needs it. Rendering treats
/// missing values as "unavailable", never as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPair {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub base_token: Option<TokenInfo>,
    #[serde(default)]
    pub quote_token: Option<TokenInfo>,
    /// Price arrives as a decimal string from the aggregator.
    #[serde(default)]
    pub price_usd: Option<Decimal>,
    #[serde(default)]
    pub price_change: Option<ChangeWindows>,
    #[serde(default)]
    pub volume: Option<VolumeWindows>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub fdv: Option<Decimal>,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub txns: Option<TxnWindows>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeWindows {
    #[serde(default)]
    pub h24: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumeWindows {
    #[serde(default)]
    pub h24: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxnWindows {
    #[serde(default)]
    pub h24: Option<TxnCounts>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxnCounts {
    #[serde(default)]
    pub buys: Option<i64>,
    #[serde(default)]
    pub sells: Option<i64>,
}

impl TradingPair {
    /// 24h liquidity in USD, zero when unreported. Primary selection key.
    pub fn liquidity_usd(&self) -> Decimal {
        self.liquidity
            .as_ref()
            .and_then(|l| l.usd)
            .unwrap_or(Decimal::ZERO)
    }

    /// 24h volume, zero when unreported. Selection tie-break key.
    pub fn volume_h24(&self) -> Decimal {
        self.volume
            .as_ref()
            .and_then(|v| v.h24)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn change_h24(&self) -> Option<Decimal> {
        self.price_change.as_ref().and_then(|c| c.h24)
    }

    pub fn base_symbol(&self) -> Option<&str> {
        self.base_token.as_ref().and_then(|t| t.symbol.as_deref())
    }

    pub fn quote_symbol(&self) -> Option<&str> {
        self.quote_token.as_ref().and_then(|t| t.symbol.as_deref())
    }

    pub fn base_address(&self) -> Option<&str> {
        self.base_token.as_ref().and_then(|t| t.address.as_deref())
    }

    pub fn txns_h24(&self) -> (Option<i64>, Option<i64>) {
        match self.txns.as_ref().and_then(|t| t.h24.as_ref()) {
            Some(counts) => (counts.buys, counts.sells),
            None => (None, None),
        }
    }
}

/// Top-level response body for a token lookup. A missing or empty `pairs`
/// array is a valid result: the token is simply not listed anywhere.
#[derive(Debug, Clone, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<TradingPair>>,
}
