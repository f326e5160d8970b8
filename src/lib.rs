pub mod analysis;
pub mod api;
pub mod chains;
pub mod config;
pub mod db;
pub mod errors;
pub mod insight;
pub mod market;
pub mod metrics;
pub mod models;
pub mod risk;

use crate::config::AppConfig;
use crate::insight::InsightClient;
use crate::market::MarketClient;
use crate::risk::RiskClient;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub market: MarketClient,
    pub risk: RiskClient,
    pub insight: InsightClient,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
