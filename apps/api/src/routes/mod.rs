pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::chat::handlers as chat_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(analysis_handlers::handle_analyze))
        .route(
            "/api/v1/analyze/realtime",
            post(analysis_handlers::handle_analyze_realtime),
        )
        .route(
            "/api/v1/analyze/job-description",
            post(analysis_handlers::handle_analyze_gap),
        )
        // Chat API
        .route("/api/v1/chat", post(chat_handlers::handle_chat))
        // Generation API
        .route(
            "/api/v1/generate/resume",
            post(generation_handlers::handle_generate_resume),
        )
        .route(
            "/api/v1/generate/cold-email",
            post(generation_handlers::handle_cold_email),
        )
        .route(
            "/api/v1/generate/job-suggestions",
            post(generation_handlers::handle_job_suggestions),
        )
        .with_state(state)
}
