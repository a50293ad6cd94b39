pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation;
use crate::extraction;
use crate::extraction::handlers::MAX_UPLOAD_BYTES;
use crate::questions;
use crate::sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/upload-resume",
            post(extraction::handlers::handle_upload_resume),
        )
        .route(
            "/generate-questions",
            post(questions::handlers::handle_generate_questions),
        )
        .route(
            "/evaluate-answers",
            post(evaluation::handlers::handle_evaluate_answers),
        )
        .route(
            "/submit-session",
            post(sessions::handlers::handle_submit_session),
        )
        .route("/sessions", get(sessions::handlers::handle_list_sessions))
        .route(
            "/sessions/:id",
            get(sessions::handlers::handle_get_session)
                .delete(sessions::handlers::handle_delete_session),
        )
        // leave headroom over the 5MB cap so the handler can report it as 400
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024 * 1024))
        .with_state(state)
}
