use async_trait::async_trait;
use serde_json::{json, Value};

use tokenlens::analysis::{run_market_analysis, run_risk_check, AnalysisError};
use tokenlens::insight::{InsightBrief, InsightError, InsightMode, NarrativeSource};
use tokenlens::market::{MarketError, PairSource, TradingPair};
use tokenlens::risk::{RiskError, RiskReport, RiskSource, RiskTier};

// ---------------------------------------------------------------------------
// Stub upstreams
// ---------------------------------------------------------------------------

struct StubPairs(Vec<TradingPair>);

#[async_trait]
impl PairSource for StubPairs {
    async fn fetch_pairs(&self, _address: &str) -> Result<Vec<TradingPair>, MarketError> {
        Ok(self.0.clone())
    }
}

struct StubRisk(Value);

#[async_trait]
impl RiskSource for StubRisk {
    async fn fetch_risk(&self, _address: &str) -> Result<RiskReport, RiskError> {
        Ok(RiskReport::from_payload(self.0.clone()))
    }
}

struct FixedNarrative(&'static str);

#[async_trait]
impl NarrativeSource for FixedNarrative {
    async fn generate(
        &self,
        _brief: &InsightBrief,
        _mode: InsightMode,
    ) -> Result<String, InsightError> {
        Ok(self.0.to_string())
    }
}

struct FailingNarrative(u16);

#[async_trait]
impl NarrativeSource for FailingNarrative {
    async fn generate(
        &self,
        _brief: &InsightBrief,
        _mode: InsightMode,
    ) -> Result<String, InsightError> {
        Err(InsightError::Status {
            status: self.0,
            body: "service unavailable".into(),
        })
    }
}

/// Build a pair from the aggregator's wire shape, string-encoded price and
/// all, so deserialization is exercised alongside the flows.
fn pair(dex: &str, chain: &str, liquidity: i64, volume: i64) -> TradingPair {
    serde_json::from_value(json!({
        "chainId": chain,
        "dexId": dex,
        "baseToken": { "address": "0xabc", "symbol": "TKN" },
        "quoteToken": { "symbol": "WETH" },
        "priceUsd": "0.045",
        "priceChange": { "h24": 2.5 },
        "volume": { "h24": volume },
        "liquidity": { "usd": liquidity },
        "txns": { "h24": { "buys": 120, "sells": 80 } }
    }))
    .expect("valid pair json")
}

// ---------------------------------------------------------------------------
// Market analysis flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_highest_liquidity_pair_drives_the_view() {
    let market = StubPairs(vec![
        pair("dex_small", "ethereum", 5_000, 1),
        pair("dex_big", "ethereum", 20_000, 1),
        pair("dex_tiny", "ethereum", 1_000, 1),
    ]);
    let narrative = FixedNarrative("**Trend**: flat\n- watch liquidity");

    let view = run_market_analysis(&market, &narrative, "0xabc", None)
        .await
        .expect("analysis should succeed");

    let overview = view.overview.content().expect("overview populated");
    assert!(overview.contains("DEX: dex_big"));
    assert!(overview.contains("Token: TKN"));

    let metrics = view.metrics.content().expect("metrics populated");
    assert!(metrics.contains("Liquidity: $20,000"));
    assert!(metrics.contains("Buy Ratio: 60.0%"));

    // All venues still listed in the pools section.
    let pools = view.pools.content().expect("pools populated");
    assert_eq!(pools.lines().count(), 3);
}

#[tokio::test]
async fn test_unknown_token_is_not_found_and_nothing_renders() {
    let market = StubPairs(vec![]);
    let narrative = FixedNarrative("unused");

    let err = run_market_analysis(&market, &narrative, "0xdead", None)
        .await
        .expect_err("empty pair set must be terminal");

    assert!(matches!(err, AnalysisError::PairNotFound));
}

#[tokio::test]
async fn test_insight_failure_degrades_only_its_section() {
    let market = StubPairs(vec![pair("uniswap", "ethereum", 9_000, 50)]);
    let narrative = FailingNarrative(503);

    let view = run_market_analysis(&market, &narrative, "0xabc", None)
        .await
        .expect("market sections must survive an insight failure");

    assert!(view.overview.content().is_some());
    assert!(view.metrics.content().is_some());
    assert!(view.pools.content().is_some());
    assert!(view.insight.is_failed());
    assert!(view.insight.content().is_none());
}

#[tokio::test]
async fn test_chain_hint_filters_and_unknown_hint_is_ignored() {
    let pairs = vec![
        pair("eth_dex", "ethereum", 50_000, 1),
        pair("sol_dex", "solana", 100, 1),
    ];
    let narrative = FixedNarrative("fine");

    let filtered = run_market_analysis(&StubPairs(pairs.clone()), &narrative, "0xabc", Some("solana"))
        .await
        .unwrap();
    assert!(filtered.overview.content().unwrap().contains("DEX: sol_dex"));

    let unknown = run_market_analysis(&StubPairs(pairs.clone()), &narrative, "0xabc", Some("dogechain"))
        .await
        .unwrap();
    let unhinted = run_market_analysis(&StubPairs(pairs), &narrative, "0xabc", None)
        .await
        .unwrap();
    assert_eq!(
        unknown.overview.content(),
        unhinted.overview.content()
    );
}

#[tokio::test]
async fn test_narrative_is_structurally_formatted() {
    let market = StubPairs(vec![pair("uniswap", "ethereum", 9_000, 50)]);
    let narrative = FixedNarrative("**Price trend**: stable\n- low volume\n- thin book");

    let view = run_market_analysis(&market, &narrative, "0xabc", None)
        .await
        .unwrap();

    let insight = view.insight.content().expect("insight populated");
    assert!(insight.contains("Price trend: stable"));
    assert!(insight.contains("• low volume"));
    assert!(!insight.contains("**"));
}

// ---------------------------------------------------------------------------
// Risk check flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_alternate_score_key_is_coalesced_and_tiered() {
    let risk = StubRisk(json!({ "risk_score": 55, "tokenName": "TKN" }));
    let narrative = FailingNarrative(500);

    let check = run_risk_check(&risk, &narrative, "So1AddressSo1AddressSo1AddressSo1")
        .await
        .expect("risk flow should succeed");

    assert_eq!(check.score, Some(55.0));
    assert_eq!(check.score_tier, Some(RiskTier::Warning));
    // Narrative failed, so the verdict falls back to the score tier.
    assert_eq!(check.verdict, RiskTier::Warning);
    assert!(check.assessment.is_failed());
    assert!(check.summary.is_none());
}

#[tokio::test]
async fn test_narrative_keywords_decide_the_verdict() {
    let risk = StubRisk(json!({ "snifscore": 85 }));
    let narrative = FixedNarrative(
        "1. Overall Risk Assessment: High Risk\n\
         2. Key Risk Factors:\n- mint authority active\n\
         Final Recommendation: avoid this token",
    );

    let check = run_risk_check(&risk, &narrative, "So1AddressSo1AddressSo1AddressSo1")
        .await
        .unwrap();

    // Score said safe, but the narrative concluded high risk.
    assert_eq!(check.score_tier, Some(RiskTier::Safe));
    assert_eq!(check.verdict, RiskTier::Risk);
    assert!(check
        .summary
        .as_deref()
        .unwrap()
        .contains("avoid this token"));
}

#[tokio::test]
async fn test_neutral_narrative_is_warning_despite_safe_score() {
    let risk = StubRisk(json!({ "snifscore": 92 }));
    let narrative = FixedNarrative("Indicators are mixed; nothing stands out either way.");

    let check = run_risk_check(&risk, &narrative, "So1AddressSo1AddressSo1AddressSo1")
        .await
        .unwrap();

    // A keyword-free narrative lands on warning; the score tier only backs
    // an unavailable narrative.
    assert_eq!(check.score_tier, Some(RiskTier::Safe));
    assert_eq!(check.verdict, RiskTier::Warning);
}

#[tokio::test]
async fn test_unscored_report_still_produces_assessment() {
    let risk = StubRisk(json!({ "_raw": "not json at all" }));
    let narrative = FixedNarrative("Nothing conclusive either way.");

    let check = run_risk_check(&risk, &narrative, "So1AddressSo1AddressSo1AddressSo1")
        .await
        .unwrap();

    assert_eq!(check.score, None);
    assert_eq!(check.score_tier, None);
    assert_eq!(check.verdict, RiskTier::Warning);
    assert!(check.assessment.content().is_some());
}

#[tokio::test]
async fn test_risk_source_status_error_propagates_with_code() {
    struct StatusRisk;

    #[async_trait]
    impl RiskSource for StatusRisk {
        async fn fetch_risk(&self, _address: &str) -> Result<RiskReport, RiskError> {
            Err(RiskError::Status { code: 429 })
        }
    }

    let err = run_risk_check(&StatusRisk, &FixedNarrative("unused"), "addr")
        .await
        .expect_err("status errors are terminal for the risk flow");

    assert!(matches!(err, RiskError::Status { code: 429 }));
}
