pub mod orchestrator;
pub mod recorder;
pub mod render;

pub use orchestrator::{run_market_analysis, run_risk_check, AnalysisError, RiskCheck};
