/// Mapping from user-facing chain keys to the canonical chain identifiers
/// used by the market data aggregator.
const CHAIN_MAPPING: &[(&str, &str)] = &[
    ("ethereum", "ethereum"),
    ("bsc", "bsc"),
    ("polygon", "polygon"),
    ("avalanche", "avalanche"),
    ("arbitrum", "arbitrum"),
    ("optimism", "optimism"),
    ("fantom", "fantom"),
    ("cronos", "cronos"),
    ("solana", "solana"),
    ("base", "base"),
    ("blast", "blast"),
    ("tron", "tron"),
    ("sui", "sui"),
    ("aptos", "aptos"),
    ("sei", "sei"),
    ("zksync", "zksync"),
    ("pulsechain", "pulsechain"),
    ("linea", "linea"),
    ("scroll", "scroll"),
    ("mantle", "mantle"),
    ("manta", "manta"),
    ("mode", "mode"),
    ("metis", "metis"),
    ("moonbeam", "moonbeam"),
    ("celo", "celo"),
    ("kava", "kava"),
    ("osmosis", "osmosis"),
];

/// Resolve a user-facing chain key to its canonical identifier.
///
/// Returns `None` for empty or unrecognized hints, which callers treat as
/// "do not filter by chain". Total over strings, no failure mode.
pub fn normalize(hint: &str) -> Option<&'static str> {
    let key = hint.trim().to_lowercase();
    CHAIN_MAPPING
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, canonical)| *canonical)
}
