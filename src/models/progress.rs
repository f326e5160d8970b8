use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the user_progress table. One record per user, mutated
/// exclusively by the analysis recorder, once per completed analysis.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProgress {
    pub user_id: Uuid,
    pub total_xp: i32,
    pub total_analyses: i32,
    pub current_streak: i32,
    pub last_analysis_date: Option<NaiveDate>,
    pub updated_at: Option<DateTime<Utc>>,
}
