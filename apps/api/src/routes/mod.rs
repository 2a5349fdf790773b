pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route(
            "/api/v1/matches/resume/:resume_id",
            get(handlers::handle_match_resume),
        )
        .route(
            "/api/v1/matches/resume/:resume_id/history",
            get(handlers::handle_match_history),
        )
        .route(
            "/api/v1/matches/job/:job_id",
            get(handlers::handle_top_matches),
        )
        .route(
            "/api/v1/matches/job/:job_id/rematch",
            post(handlers::handle_rematch),
        )
        .with_state(state)
}
