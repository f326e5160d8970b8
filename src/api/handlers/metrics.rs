use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Prometheus scrape endpoint. Renders the analysis/risk-check counters and
/// latency histograms registered in `crate::metrics::init_metrics`.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics_handle.render();
    ([(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body)
}
