use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::db::analysis_repo;
use crate::errors::AppError;
use crate::models::SavedAnalysis;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SavedAnalysis>>, AppError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let analyses = analysis_repo::get_recent_analyses(&state.db, user.0, limit).await?;
    Ok(Json(analyses))
}

pub async fn detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedAnalysis>, AppError> {
    analysis_repo::get_analysis(&state.db, user.0, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Analysis not found".into()))
}
