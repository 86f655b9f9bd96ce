pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview;
use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Mock-interview API
        .route("/api/interview/question", post(interview::handle_question))
        .route("/api/interview/evaluate", post(interview::handle_evaluate))
        .route("/api/interview/upload", post(interview::handle_upload))
        .route("/api/interview/analyze", post(interview::handle_analyze))
        // Job-chat API
        .route("/api/chat", post(jobs::handle_chat))
        // Resume-checker API
        .route("/api/resume/check", post(resume::handle_check))
        .with_state(state)
}
