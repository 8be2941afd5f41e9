//! Unversioned `/api` routes spoken by the bundled web client.
//!
//! Endpoints:
//! - GET  /api/health   - `{"ok": true}`
//! - POST /api/session  - `{"session_id": "..."}`
//! - POST /api/chat     - same body and reply fields as `/api/v1/chat`, unwrapped
//! - POST /api/reset    - body `{"session_id": "..."}`, replies `{"ok": true}`
//!
//! Errors use `{"error": {"message": "...", "code": "..."}}`.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::{Value, json};

use supportbot_core::session::store::SessionStore;
use supportbot_types::error::InvalidInput;

use crate::http::context::RequestContext;
use crate::http::error::LegacyError;
use crate::http::handlers::chat::{ChatReply, ChatRequest, non_empty_string, run_turn};
use crate::http::handlers::session::reset_existing;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub session_id: Option<Value>,
}

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({"ok": true}))
}

/// POST /api/session - Create a new, empty session.
pub async fn create_session(State(state): State<AppState>) -> Result<Json<Value>, LegacyError> {
    let ctx = RequestContext::start();
    let session_id = state
        .sessions
        .create_session()
        .await
        .map_err(|e| ctx.fail_legacy(e))?;
    Ok(Json(json!({"session_id": session_id})))
}

/// POST /api/chat - Run one chat turn against a session.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, LegacyError> {
    let ctx = RequestContext::start();
    let request = ChatRequest::from_payload(payload, &ctx);

    let reply = run_turn(&state, request, &ctx)
        .await
        .map_err(|e| ctx.fail_legacy(e))?;
    Ok(Json(reply))
}

/// POST /api/reset - Clear the history of the session named in the body.
pub async fn reset(
    State(state): State<AppState>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> Result<Json<Value>, LegacyError> {
    let ctx = RequestContext::start();
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    let session_id = non_empty_string(request.session_id.as_ref())
        .ok_or_else(|| ctx.fail_legacy(InvalidInput::MissingSession))?;

    reset_existing(&state, session_id)
        .await
        .map_err(|e| ctx.fail_legacy(e))?;
    Ok(Json(json!({"ok": true})))
}
