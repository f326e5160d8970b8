use metrics::{counter, histogram};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;

use crate::insight::narrative::{extract_summary, format_narrative};
use crate::insight::{InsightBrief, InsightMode, MarketBrief, NarrativeSource};
use crate::market::{select_best_pair, MarketError, PairSource};
use crate::models::{ComposedView, Section};
use crate::risk::{RiskError, RiskSource, RiskTier};

/// Errors that are terminal for the market-analysis flow. Without a
/// representative pair there is nothing to show, so these surface as a
/// single top-level report instead of per-section degradation.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no trading pair found for this token")]
    PairNotFound,

    #[error(transparent)]
    Market(#[from] MarketError),
}

/// Run the market-analysis flow for one address.
///
/// Market data is the product's core value: a fetch failure or an empty pair
/// set aborts the whole operation. The narrative insight is an enhancement:
/// its failure only marks the insight section degraded, and the rest of the
/// composed view is still produced.
pub async fn run_market_analysis<P, N>(
    market: &P,
    narrative: &N,
    address: &str,
    chain_hint: Option<&str>,
) -> Result<ComposedView, AnalysisError>
where
    P: PairSource + ?Sized,
    N: NarrativeSource + ?Sized,
{
    let start = Instant::now();

    let pairs = market.fetch_pairs(address).await?;
    let best = select_best_pair(&pairs, chain_hint).ok_or(AnalysisError::PairNotFound)?;

    tracing::info!(
        address,
        chain = best.chain_id.as_deref().unwrap_or("unknown"),
        dex = best.dex_id.as_deref().unwrap_or("unknown"),
        liquidity = %best.liquidity_usd(),
        pair_count = pairs.len(),
        "Representative pair selected"
    );

    let overview = Section::populated(super::render::render_overview(best));
    let metrics = Section::populated(super::render::render_metrics(best));
    let pools = Section::populated(super::render::render_pools(&pairs));

    let brief = InsightBrief::Market(MarketBrief::from_pair(address, chain_hint, best));
    let insight = match narrative.generate(&brief, InsightMode::MarketInsight).await {
        Ok(text) => Section::populated(format_narrative(&text)),
        Err(e) => {
            tracing::warn!(address, error = %e, "Insight generation failed, degrading section");
            counter!("insight_failures_total").increment(1);
            Section::failed("Failed to generate insights")
        }
    };

    let view = ComposedView {
        address: address.to_string(),
        chain: chain_hint.map(str::to_string),
        token_symbol: best.base_symbol().map(str::to_string),
        overview,
        metrics,
        pools,
        insight,
    };

    counter!("analyses_total").increment(1);
    histogram!("analysis_latency_seconds").record(start.elapsed().as_secs_f64());

    Ok(view)
}

/// Result of the risk-check flow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCheck {
    pub address: String,
    /// Coalesced 0-100 score when the source reported one.
    pub score: Option<f64>,
    /// Tier derived from the score alone, shown before the narrative lands.
    pub score_tier: Option<RiskTier>,
    pub assessment: Section,
    pub summary: Option<String>,
    /// Final badge: narrative keywords when available, score tier otherwise.
    pub verdict: RiskTier,
}

/// Run the risk-check flow for one address.
///
/// A risk-source failure is terminal here (there is nothing to assess), and
/// the HTTP status code is propagated to the caller. The narrative
/// assessment soft-fails like the market flow's insight section.
pub async fn run_risk_check<R, N>(
    risk: &R,
    narrative: &N,
    address: &str,
) -> Result<RiskCheck, RiskError>
where
    R: RiskSource + ?Sized,
    N: NarrativeSource + ?Sized,
{
    let start = Instant::now();

    let report = risk.fetch_risk(address).await?;
    let score_tier = report.tier();

    tracing::info!(
        address,
        score = report.score.map(|s| s.to_string()).as_deref().unwrap_or("unreported"),
        "Risk report fetched"
    );

    let brief = InsightBrief::Risk(report.payload.clone());
    let (assessment, summary, verdict) =
        match narrative.generate(&brief, InsightMode::RiskAssessment).await {
            Ok(text) => {
                let verdict = verdict_from_narrative(&text);
                let summary = extract_summary(&text);
                (Section::populated(format_narrative(&text)), summary, verdict)
            }
            Err(e) => {
                tracing::warn!(address, error = %e, "Risk assessment generation failed");
                counter!("insight_failures_total").increment(1);
                (
                    Section::failed("AI analysis failed"),
                    None,
                    score_tier.unwrap_or(RiskTier::Warning),
                )
            }
        };

    counter!("risk_checks_total").increment(1);
    histogram!("risk_check_latency_seconds").record(start.elapsed().as_secs_f64());

    Ok(RiskCheck {
        address: address.to_string(),
        score: report.score,
        score_tier,
        assessment,
        summary,
        verdict,
    })
}

/// Re-derive the badge from what the narrative actually concluded. Risk
/// wording is checked before safe wording so "not safe, high risk" lands on
/// the cautious side; a narrative with neither is a warning regardless of
/// the score. The score tier only backs an unavailable narrative.
fn verdict_from_narrative(text: &str) -> RiskTier {
    let lower = text.to_lowercase();
    if ["high risk", "risky", "dangerous"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        RiskTier::Risk
    } else if ["safe", "low risk"].iter().any(|kw| lower.contains(kw)) {
        RiskTier::Safe
    } else {
        RiskTier::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_risk_keywords_win() {
        assert_eq!(
            verdict_from_narrative("This token is not safe: high risk of rug"),
            RiskTier::Risk
        );
    }

    #[test]
    fn test_verdict_safe() {
        assert_eq!(
            verdict_from_narrative("Contract looks safe overall"),
            RiskTier::Safe
        );
    }

    #[test]
    fn test_verdict_neutral_is_warning() {
        assert_eq!(
            verdict_from_narrative("Mixed indicators, proceed with caution"),
            RiskTier::Warning
        );
    }
}
