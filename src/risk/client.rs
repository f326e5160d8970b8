use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

const DEFAULT_RISK_API_BASE: &str = "https://solsniffer.com";
const RISK_API_PATH: &str = "/api/v2/token";

/// Score field names the scoring source has been observed to use, in
/// priority order. Coalesced once here, never downstream.
const SCORE_KEYS: &[&str] = &["snifscore", "snifScore", "score", "risk_score", "riskScore"];

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("risk source returned HTTP {code}")]
    Status { code: u16 },

    #[error("risk data request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Three-tier badge classification for a 0-100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Safe,
    Warning,
    Risk,
}

impl RiskTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            RiskTier::Safe
        } else if score >= 40.0 {
            RiskTier::Warning
        } else {
            RiskTier::Risk
        }
    }
}

/// Security/risk payload for a token. The source's schema is not
/// contractually fixed, so the payload is carried verbatim and only the
/// score is lifted out.
#[derive(Debug, Clone)]
pub struct RiskReport {
    pub score: Option<f64>,
    pub payload: Value,
}

impl RiskReport {
    pub fn from_payload(payload: Value) -> Self {
        let score = SCORE_KEYS
            .iter()
            .find_map(|key| payload.get(key))
            .and_then(Value::as_f64);
        Self { score, payload }
    }

    pub fn tier(&self) -> Option<RiskTier> {
        self.score.map(RiskTier::from_score)
    }
}

#[async_trait]
pub trait RiskSource: Send + Sync {
    async fn fetch_risk(&self, address: &str) -> Result<RiskReport, RiskError>;
}

#[derive(Debug, Clone)]
pub struct RiskClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RiskClient {
    pub fn new(http: Client, base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.unwrap_or_else(|| DEFAULT_RISK_API_BASE.into()),
            api_key,
        }
    }
}

#[async_trait]
impl RiskSource for RiskClient {
    /// Fetch the risk report for a token address.
    ///
    /// Non-success statuses propagate with their code. A body that is not
    /// JSON is tolerated: the raw text is wrapped under a `_raw` field so
    /// the narrative stage can still work with it.
    async fn fetch_risk(&self, address: &str) -> Result<RiskReport, RiskError> {
        let url = format!("{}{}/{}", self.base_url, RISK_API_PATH, address);
        let mut req = self.http.get(&url).header("accept", "application/json");
        if let Some(key) = &self.api_key {
            req = req.header("X-API-KEY", key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RiskError::Status {
                code: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let payload = serde_json::from_str::<Value>(&body)
            .unwrap_or_else(|_| json!({ "_raw": body }));

        Ok(RiskReport::from_payload(payload))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
