pub mod client;
pub mod selector;
pub mod types;

pub use client::{MarketClient, MarketError, PairSource};
pub use selector::select_best_pair;
pub use types::TradingPair;
