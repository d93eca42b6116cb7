pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/profiles", get(handlers::handle_list_profiles))
        .route("/api/v1/score", post(handlers::handle_score))
        // Upload path kept for existing frontends
        .route("/upload-resume/", post(handlers::handle_upload))
        .layer(body_limit)
        .with_state(state)
}
