use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::UserProgress;

/// Fetch a user's progress record, creating the zeroed row on first touch.
pub async fn get_or_create(pool: &PgPool, user_id: Uuid) -> anyhow::Result<UserProgress> {
    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    let progress = sqlx::query_as::<_, UserProgress>(
        "SELECT * FROM user_progress WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(progress)
}

/// Apply one completed analysis: bump XP and the total counter, set the
/// streak the recorder computed, and stamp today's date.
pub async fn apply_analysis(
    pool: &PgPool,
    user_id: Uuid,
    xp_delta: i32,
    streak: i32,
    today: NaiveDate,
) -> anyhow::Result<UserProgress> {
    let progress = sqlx::query_as::<_, UserProgress>(
        r#"
        UPDATE user_progress
        SET total_xp = total_xp + $2,
            total_analyses = total_analyses + 1,
            current_streak = $3,
            last_analysis_date = $4,
            updated_at = NOW()
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(xp_delta)
    .bind(streak)
    .bind(today)
    .fetch_one(pool)
    .await?;

    Ok(progress)
}
