//! Plain-text rendering of composed-view sections, with the dashboard's
//! formatting conventions: missing values render as an em dash, USD values
//! group thousands and drop to exponential notation below $1, prices carry
//! up to 8 fractional digits.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::market::TradingPair;

const MISSING: &str = "—";
const MAX_POOLS_SHOWN: usize = 5;

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn grouped_decimal(value: Decimal, max_frac_digits: u32) -> String {
    let rounded = value.round_dp(max_frac_digits).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{}.{f}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(int_part)),
    }
}

/// USD amounts: grouped to two decimals at or above $1, exponential below.
pub fn fmt_usd(value: Option<Decimal>) -> String {
    match value {
        Some(v) if v >= Decimal::ONE => format!("${}", grouped_decimal(v, 2)),
        Some(v) => format!("${:.2e}", v.to_f64().unwrap_or_default()),
        None => MISSING.to_string(),
    }
}

/// Token prices: grouped, up to 8 fractional digits.
pub fn fmt_price(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${}", grouped_decimal(v, 8)),
        None => MISSING.to_string(),
    }
}

pub fn fmt_num(value: Option<i64>) -> String {
    match value {
        Some(v) => {
            let sign = if v < 0 { "-" } else { "" };
            format!("{sign}{}", group_thousands(&v.unsigned_abs().to_string()))
        }
        None => MISSING.to_string(),
    }
}

pub fn fmt_pct(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => MISSING.to_string(),
    }
}

fn line(key: &str, value: impl AsRef<str>) -> String {
    format!("{key}: {}", value.as_ref())
}

/// Token overview section: identity, venue, price and valuation.
pub fn render_overview(pair: &TradingPair) -> String {
    let base = pair.base_symbol().unwrap_or(MISSING);
    let quote = pair.quote_symbol().unwrap_or(MISSING);

    [
        line("Token", base),
        line("Pair", format!("{base}/{quote}")),
        line("DEX", pair.dex_id.as_deref().unwrap_or(MISSING)),
        line("Chain", pair.chain_id.as_deref().unwrap_or(MISSING)),
        line("Price", fmt_price(pair.price_usd)),
        line("24h Change", fmt_pct(pair.change_h24())),
        line("FDV", fmt_usd(pair.fdv)),
        line("Market Cap", fmt_usd(pair.market_cap)),
    ]
    .join("\n")
}

/// Metrics section: activity over the last 24 hours.
pub fn render_metrics(pair: &TradingPair) -> String {
    let (buys, sells) = pair.txns_h24();
    let total = match (buys, sells) {
        (None, None) => None,
        _ => Some(buys.unwrap_or(0) + sells.unwrap_or(0)),
    };
    let buy_ratio = match (buys, sells) {
        (Some(b), Some(s)) if b + s > 0 => {
            format!("{:.1}%", (b as f64 / (b + s) as f64) * 100.0)
        }
        _ => MISSING.to_string(),
    };

    [
        line("Volume (24h)", fmt_usd(pair.volume.as_ref().and_then(|v| v.h24))),
        line("Liquidity", fmt_usd(pair.liquidity.as_ref().and_then(|l| l.usd))),
        line("Transactions (24h)", fmt_num(total)),
        line("Buys", fmt_num(buys)),
        line("Sells", fmt_num(sells)),
        line("Buy Ratio", buy_ratio),
    ]
    .join("\n")
}

/// Liquidity pools section: the first few venues in upstream order.
pub fn render_pools(pairs: &[TradingPair]) -> String {
    if pairs.is_empty() {
        return "No pools found".to_string();
    }

    pairs
        .iter()
        .take(MAX_POOLS_SHOWN)
        .map(|p| {
            format!(
                "{} {}/{} on {}: {}",
                p.dex_id.as_deref().unwrap_or(MISSING),
                p.base_symbol().unwrap_or(MISSING),
                p.quote_symbol().unwrap_or(MISSING),
                p.chain_id.as_deref().unwrap_or(MISSING),
                fmt_usd(p.liquidity.as_ref().and_then(|l| l.usd)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
