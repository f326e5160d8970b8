use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{analysis_repo, progress_repo};
use crate::models::{ComposedView, UserProgress};

/// Fixed XP reward per recorded analysis, independent of streak.
pub const XP_PER_ANALYSIS: i32 = 10;

/// Streak continuation rule over calendar dates, not timestamps:
/// a repeat analysis on the same day leaves the streak unchanged, an
/// analysis on the next calendar day extends it, anything else (including a
/// first-ever analysis) resets it to 1.
pub fn next_streak(last: Option<NaiveDate>, today: NaiveDate, current: i32) -> i32 {
    match last {
        Some(d) if d == today => current,
        Some(d) if d.succ_opt() == Some(today) => current + 1,
        _ => 1,
    }
}

/// Persist a composed view for its owner and update their progress record.
///
/// A failed insight section is stored as an empty placeholder so the saved
/// analysis replays without it. Not replay-safe: calling this twice for the
/// same analysis double-counts XP, so callers invoke it once per completed
/// analysis.
pub async fn record(pool: &PgPool, user_id: Uuid, view: &ComposedView) -> anyhow::Result<UserProgress> {
    analysis_repo::insert_analysis(
        pool,
        user_id,
        &view.address,
        view.chain.as_deref(),
        view.token_symbol.as_deref(),
        view.overview.content().unwrap_or(""),
        view.metrics.content().unwrap_or(""),
        view.insight.content().unwrap_or(""),
    )
    .await?;

    let progress = progress_repo::get_or_create(pool, user_id).await?;
    let today = Utc::now().date_naive();
    let streak = next_streak(progress.last_analysis_date, today, progress.current_streak);

    let updated = progress_repo::apply_analysis(pool, user_id, XP_PER_ANALYSIS, streak, today).await?;

    tracing::info!(
        user = %user_id,
        address = %view.address,
        xp = updated.total_xp,
        streak = updated.current_streak,
        "Analysis recorded"
    );

    Ok(updated)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        assert_eq!(next_streak(Some(date(2024, 3, 1)), date(2024, 3, 2), 4), 5);
    }

    #[test]
    fn test_same_day_leaves_streak_unchanged() {
        assert_eq!(next_streak(Some(date(2024, 3, 1)), date(2024, 3, 1), 4), 4);
    }

    #[test]
    fn test_gap_resets_streak() {
        assert_eq!(next_streak(Some(date(2024, 2, 20)), date(2024, 3, 1), 9), 1);
    }

    #[test]
    fn test_first_analysis_starts_streak() {
        assert_eq!(next_streak(None, date(2024, 3, 1), 0), 1);
    }

    #[test]
    fn test_month_boundary_counts_as_consecutive() {
        assert_eq!(next_streak(Some(date(2024, 2, 29)), date(2024, 3, 1), 2), 3);
    }
}
