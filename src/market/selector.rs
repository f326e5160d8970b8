use crate::chains;

use super::types::TradingPair;

/// Pick the single representative pair for a token.
///
/// A recognized chain hint filters the set first, matching either the
/// canonical chain id or the raw hint (upstream records are not always
/// consistent about which they report). An empty filter result falls back to
/// the full set: a pair on the wrong chain beats no pair at all. The winner
/// is the maximum by 24h liquidity, tie-broken by 24h volume, both with
/// missing values treated as zero. Liquidity leads because a thin pair can
/// show a wash-traded volume spike while holding negligible liquidity.
pub fn select_best_pair<'a>(
    pairs: &'a [TradingPair],
    chain_hint: Option<&str>,
) -> Option<&'a TradingPair> {
    if pairs.is_empty() {
        return None;
    }

    let working: Vec<&TradingPair> = match chain_hint.and_then(chains::normalize) {
        Some(canonical) => {
            let raw = chain_hint.unwrap_or_default();
            let filtered: Vec<&TradingPair> = pairs
                .iter()
                .filter(|p| {
                    p.chain_id.as_deref() == Some(canonical) || p.chain_id.as_deref() == Some(raw)
                })
                .collect();

            if filtered.is_empty() {
                pairs.iter().collect()
            } else {
                filtered
            }
        }
        // Absent or unrecognized hints mean "no filter".
        None => pairs.iter().collect(),
    };

    working.into_iter().max_by(|a, b| {
        a.liquidity_usd()
            .cmp(&b.liquidity_usd())
            .then(a.volume_h24().cmp(&b.volume_h24()))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
