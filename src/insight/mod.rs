pub mod brief;
pub mod client;
pub mod narrative;

pub use brief::{InsightBrief, MarketBrief};
pub use client::{InsightClient, InsightError, InsightMode, InsightSettings, NarrativeSource};
