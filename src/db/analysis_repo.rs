use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::SavedAnalysis;

/// Insert a new saved analysis. Rows are immutable once written; there is
/// no update path.
#[allow(clippy::too_many_arguments)]
pub async fn insert_analysis(
    pool: &PgPool,
    user_id: Uuid,
    contract_address: &str,
    chain: Option<&str>,
    token_symbol: Option<&str>,
    token_data: &str,
    metrics_data: &str,
    ai_insights: &str,
) -> anyhow::Result<SavedAnalysis> {
    let analysis = sqlx::query_as::<_, SavedAnalysis>(
        r#"
        INSERT INTO analyses (user_id, contract_address, chain, token_symbol, token_data, metrics_data, ai_insights)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(contract_address)
    .bind(chain)
    .bind(token_symbol)
    .bind(token_data)
    .bind(metrics_data)
    .bind(ai_insights)
    .fetch_one(pool)
    .await?;

    Ok(analysis)
}

/// Get the N most recent analyses for a user.
pub async fn get_recent_analyses(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> anyhow::Result<Vec<SavedAnalysis>> {
    let analyses = sqlx::query_as::<_, SavedAnalysis>(
        "SELECT * FROM analyses WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(analyses)
}

/// Get a single analysis, scoped to its owner. Returns None when the row
/// does not exist or belongs to another user.
pub async fn get_analysis(
    pool: &PgPool,
    user_id: Uuid,
    analysis_id: Uuid,
) -> anyhow::Result<Option<SavedAnalysis>> {
    let analysis = sqlx::query_as::<_, SavedAnalysis>(
        "SELECT * FROM analyses WHERE id = $1 AND user_id = $2",
    )
    .bind(analysis_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(analysis)
}

/// Count analyses a user recorded on a given calendar day.
pub async fn count_on_date(pool: &PgPool, user_id: Uuid, day: NaiveDate) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM analyses WHERE user_id = $1 AND created_at::date = $2",
    )
    .bind(user_id)
    .bind(day)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
