use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // API routes — each handler authenticates through the AuthUser extractor
    let api = Router::new()
        // Analysis flows
        .route("/api/analyze", post(handlers::analyze::analyze))
        .route("/api/rugcheck", post(handlers::rugcheck::check))
        // Dashboard
        .route("/api/dashboard/summary", get(handlers::dashboard::summary))
        .route("/api/dashboard/trending", get(handlers::dashboard::trending))
        // Saved history
        .route("/api/analyses", get(handlers::history::list))
        .route("/api/analyses/:id", get(handlers::history::detail));

    // CORS: the dashboard is served from another origin in development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
