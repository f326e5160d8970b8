use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::analysis::{run_risk_check, RiskCheck};
use crate::api::auth::AuthUser;
use crate::errors::AppError;
use crate::risk::{plausible_token_address, RiskError};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RugCheckRequest {
    pub address: String,
    /// User override for the address length heuristic.
    #[serde(default)]
    pub allow_unusual: bool,
}

pub async fn check(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<RugCheckRequest>,
) -> Result<Json<RiskCheck>, AppError> {
    let address = req.address.trim().to_string();
    if address.is_empty() {
        return Err(AppError::BadRequest("Token address is required".into()));
    }

    if !plausible_token_address(&address) && !req.allow_unusual {
        return Err(AppError::BadRequest(
            "Address format looks unusual; set allowUnusual to continue anyway".into(),
        ));
    }

    let result = run_risk_check(&state.risk, &state.insight, &address)
        .await
        .map_err(|e| match e {
            RiskError::Status { code } => {
                AppError::Upstream(format!("Risk source returned HTTP {code}"))
            }
            RiskError::Network(err) => {
                tracing::error!(address = %address, error = %err, "Risk data fetch failed");
                AppError::Upstream("Failed to fetch token risk data".into())
            }
        })?;

    Ok(Json(result))
}
