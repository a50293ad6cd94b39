use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::evaluation::EvaluationResult;
use crate::models::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub ok: bool,
    pub ai: EvaluationResult,
}

/// POST /evaluate-answers
///
/// Body is a session object; only `questions` and `answers` are consulted.
/// Accepted as raw JSON first so a missing `questions` field maps to the
/// uniform 400 body instead of an extractor rejection.
pub async fn handle_evaluate_answers(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<EvaluateResponse>, AppError> {
    if payload.get("questions").is_none() {
        return Err(AppError::Validation("invalid payload".to_string()));
    }
    let session: Session = serde_json::from_value(payload)
        .map_err(|e| AppError::Validation(format!("malformed session: {e}")))?;

    let ai = crate::evaluation::evaluate(&state.llm, &session.questions, &session.answers).await;
    Ok(Json(EvaluateResponse { ok: true, ai }))
}
