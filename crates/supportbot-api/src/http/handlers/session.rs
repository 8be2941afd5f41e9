//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/sessions                - Create an empty session
//! - GET  /api/v1/sessions/{id}/messages  - Snapshot of a session's history
//! - POST /api/v1/sessions/{id}/reset     - Clear history but keep the session

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use supportbot_core::session::store::SessionStore;
use supportbot_types::chat::ChatMessage;

use crate::http::context::RequestContext;
use crate::http::error::{AppError, RequestError};
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionMessages {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct SessionReset {
    pub session_id: String,
    pub reset: bool,
}

/// Clear a session's history, or fail if the id is unknown.
pub(crate) async fn reset_existing(state: &AppState, session_id: &str) -> Result<(), AppError> {
    if !state.sessions.reset(session_id).await? {
        return Err(AppError::SessionNotFound(session_id.to_string()));
    }
    tracing::info!(session_id = %session_id, "Session reset");
    Ok(())
}

/// POST /api/v1/sessions - Create a new, empty session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionCreated>>, RequestError> {
    let ctx = RequestContext::start();

    let session_id = state
        .sessions
        .create_session()
        .await
        .map_err(|e| ctx.fail(e))?;

    let messages_link = format!("/api/v1/sessions/{session_id}/messages");
    let resp = ctx
        .success(SessionCreated { session_id })
        .with_link("messages", &messages_link)
        .with_link("chat", "/api/v1/chat");

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id}/messages - Get the message history for a session.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionMessages>>, RequestError> {
    let ctx = RequestContext::start();

    let messages = state
        .sessions
        .get(&session_id)
        .await
        .map_err(|e| ctx.fail(e))?
        .ok_or_else(|| ctx.fail(AppError::SessionNotFound(session_id.clone())))?;

    let self_link = format!("/api/v1/sessions/{session_id}/messages");
    let resp = ctx
        .success(SessionMessages {
            session_id,
            messages,
        })
        .with_link("self", &self_link);

    Ok(Json(resp))
}

/// POST /api/v1/sessions/{id}/reset - Clear a session's history.
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionReset>>, RequestError> {
    let ctx = RequestContext::start();

    reset_existing(&state, &session_id)
        .await
        .map_err(|e| ctx.fail(e))?;

    Ok(Json(ctx.success(SessionReset {
        session_id,
        reset: true,
    })))
}
