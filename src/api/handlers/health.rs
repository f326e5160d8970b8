use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// Liveness probe. The dashboard uses the `db` field to tell a lost
/// database apart from a dead service; upstream data sources are not probed
/// here since each request degrades per-section anyway.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if db_ok { "healthy" } else { "unhealthy" },
            "service": "tokenlens",
            "db": if db_ok { "connected" } else { "disconnected" },
        })),
    )
}
