use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitSessionResponse {
    pub ok: bool,
    pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub ok: bool,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
    pub removed: usize,
}

/// POST /submit-session — upsert; id and createdAt are assigned when absent.
pub async fn handle_submit_session(
    State(state): State<AppState>,
    Json(session): Json<Session>,
) -> Result<Json<SubmitSessionResponse>, AppError> {
    let stored = state.store.upsert(session).await?;
    Ok(Json(SubmitSessionResponse {
        ok: true,
        session: stored,
    }))
}

/// GET /sessions — all records, newest first.
pub async fn handle_list_sessions(
    State(state): State<AppState>,
) -> Result<Json<SessionListResponse>, AppError> {
    let sessions = state.store.list().await?;
    Ok(Json(SessionListResponse { ok: true, sessions }))
}

/// GET /sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("not found".to_string()))?;
    Ok(Json(SessionResponse { ok: true, session }))
}

/// DELETE /sessions/:id — removing an unknown id reports zero removed.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = state.store.delete(&id).await?;
    Ok(Json(DeleteResponse { ok: true, removed }))
}
