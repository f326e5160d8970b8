use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::{recorder, run_market_analysis, AnalysisError};
use crate::api::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{ComposedView, UserProgress};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub address: String,
    #[serde(default)]
    pub chain: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub view: ComposedView,
    /// Updated gamification counters; absent when persistence failed.
    pub progress: Option<UserProgress>,
    /// Secondary, dismissible notice. A persistence failure never hides the
    /// rendered analysis.
    pub record_error: Option<String>,
}

pub async fn analyze(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let address = req.address.trim().to_string();
    if address.is_empty() {
        return Err(AppError::BadRequest("Contract address is required".into()));
    }

    let chain = req
        .chain
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let view = run_market_analysis(&state.market, &state.insight, &address, chain)
        .await
        .map_err(|e| match e {
            AnalysisError::PairNotFound => {
                AppError::NotFound("No trading pair found for this token".into())
            }
            AnalysisError::Market(err) => {
                tracing::error!(address = %address, error = %err, "Market data fetch failed");
                AppError::Upstream("Failed to load token data".into())
            }
        })?;

    let (progress, record_error) = match recorder::record(&state.db, user.0, &view).await {
        Ok(p) => (Some(p), None),
        Err(e) => {
            tracing::error!(user = %user.0, error = %e, "Failed to record analysis");
            (
                None,
                Some("Analysis completed but could not be saved".to_string()),
            )
        }
    };

    Ok(Json(AnalyzeResponse {
        view,
        progress,
        record_error,
    }))
}
