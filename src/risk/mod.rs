pub mod client;

pub use client::{RiskClient, RiskError, RiskReport, RiskSource, RiskTier};

/// Length heuristic for token addresses (covers base58 pubkeys and 0x
/// addresses). Used only to flag unusual input before a risk check; the
/// caller may override, no on-chain validation is performed.
pub fn plausible_token_address(s: &str) -> bool {
    let len = s.trim().len();
    (32..=60).contains(&len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_addresses_are_plausible() {
        assert!(plausible_token_address(
            "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"
        ));
        assert!(plausible_token_address(
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
        ));
    }

    #[test]
    fn test_short_and_long_inputs_are_flagged() {
        assert!(!plausible_token_address("abc"));
        assert!(!plausible_token_address(&"a".repeat(61)));
        assert!(!plausible_token_address(""));
    }
}
