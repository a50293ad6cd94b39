use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::session::Question;
use crate::state::AppState;

fn default_role() -> String {
    "fullstack".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(rename = "resumeText", default)]
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub ok: bool,
    pub questions: Vec<Question>,
}

/// POST /generate-questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(req): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let questions = crate::questions::generate(&state.llm, &req.role, &req.resume_text).await;
    Ok(Json(GenerateQuestionsResponse {
        ok: true,
        questions,
    }))
}
