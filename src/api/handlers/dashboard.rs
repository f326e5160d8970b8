use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::db::{analysis_repo, progress_repo};
use crate::errors::AppError;
use crate::market::PairSource;
use crate::AppState;

/// Reference token whose pair listing seeds the trending table (WETH).
const TRENDING_REFERENCE_TOKEN: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
const TRENDING_LIMIT: usize = 10;
const RECENT_LIMIT: i64 = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_xp: i32,
    pub total_analyses: i32,
    pub current_streak: i32,
    pub analyses_today: i64,
    pub recent: Vec<RecentAnalysis>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAnalysis {
    pub id: Uuid,
    pub token_symbol: Option<String>,
    pub chain: Option<String>,
    pub contract_address: String,
    pub created_at: DateTime<Utc>,
}

pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardSummary>, AppError> {
    let progress = progress_repo::get_or_create(&state.db, user.0).await?;

    let today = Utc::now().date_naive();
    let analyses_today = analysis_repo::count_on_date(&state.db, user.0, today).await?;

    let recent = analysis_repo::get_recent_analyses(&state.db, user.0, RECENT_LIMIT)
        .await?
        .into_iter()
        .map(|a| RecentAnalysis {
            id: a.id,
            token_symbol: a.token_symbol,
            chain: a.chain,
            contract_address: a.contract_address,
            created_at: a.created_at,
        })
        .collect();

    Ok(Json(DashboardSummary {
        total_xp: progress.total_xp,
        total_analyses: progress.total_analyses,
        current_streak: progress.current_streak,
        analyses_today,
        recent,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingPair {
    pub symbol: Option<String>,
    pub chain: Option<String>,
    pub address: Option<String>,
    pub price_usd: Option<Decimal>,
    #[serde(rename = "change24h")]
    pub change_24h: Option<Decimal>,
    #[serde(rename = "volume24h")]
    pub volume_24h: Option<Decimal>,
}

pub async fn trending(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<TrendingPair>>, AppError> {
    let mut pairs = state
        .market
        .fetch_pairs(TRENDING_REFERENCE_TOKEN)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Trending token fetch failed");
            AppError::Upstream("Failed to load trending tokens".into())
        })?;

    pairs.sort_by(|a, b| b.volume_h24().cmp(&a.volume_h24()));

    let top = pairs
        .into_iter()
        .take(TRENDING_LIMIT)
        .map(|p| {
            let symbol = p.base_symbol().map(str::to_string);
            let address = p.base_address().map(str::to_string);
            let change_24h = p.change_h24();
            let volume_24h = p.volume.as_ref().and_then(|v| v.h24);
            TrendingPair {
                symbol,
                chain: p.chain_id.clone(),
                address,
                price_usd: p.price_usd,
                change_24h,
                volume_24h,
            }
        })
        .collect();

    Ok(Json(top))
}
