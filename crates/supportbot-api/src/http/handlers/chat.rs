//! Chat HTTP handler.
//!
//! POST /api/v1/chat
//!
//! Request body: `{"session_id": "...", "message": "...", "model": "..."?}`.
//! Fields are validated by hand so a wrong JSON type yields the same
//! `VALIDATION_ERROR` messages as a missing field.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use supportbot_core::session::store::SessionStore;
use supportbot_types::chat::{ChatMessage, Intent};
use supportbot_types::error::InvalidInput;

use crate::http::context::RequestContext;
use crate::http::error::{AppError, RequestError};
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Raw chat request body.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub model: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub messages: Vec<ChatMessage>,
    pub session_id: String,
    pub model: String,
    pub intent: Intent,
}

/// Validated chat request fields.
#[derive(Debug, PartialEq)]
struct ChatInput {
    session_id: String,
    message: String,
    model: String,
}

/// A JSON string with at least one character. Whitespace counts.
pub(crate) fn non_empty_string(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

impl ChatRequest {
    /// Unreadable bodies are treated as `{}`.
    pub(crate) fn from_payload(
        payload: Result<Json<ChatRequest>, JsonRejection>,
        ctx: &RequestContext,
    ) -> Self {
        match payload {
            Ok(Json(request)) => request,
            Err(rejection) => {
                tracing::debug!(request_id = %ctx.request_id, "Unparseable chat body: {rejection}");
                ChatRequest::default()
            }
        }
    }

    fn validate(&self, default_model: &str) -> Result<ChatInput, InvalidInput> {
        let session_id =
            non_empty_string(self.session_id.as_ref()).ok_or(InvalidInput::MissingSession)?;
        let message = non_empty_string(self.message.as_ref()).ok_or(InvalidInput::Message)?;

        let model = match &self.model {
            None | Some(Value::Null) => default_model,
            Some(Value::String(s)) if !s.trim().is_empty() => s.as_str(),
            Some(_) => return Err(InvalidInput::Model),
        };

        Ok(ChatInput {
            session_id: session_id.to_string(),
            message: message.to_string(),
            model: model.to_string(),
        })
    }
}

/// Validate, load the session, run the turn and store the new history.
pub(crate) async fn run_turn(
    state: &AppState,
    request: ChatRequest,
    ctx: &RequestContext,
) -> Result<ChatReply, AppError> {
    let input = request.validate(state.default_model())?;

    let history = state
        .sessions
        .get(&input.session_id)
        .await?
        .ok_or_else(|| AppError::SessionNotFound(input.session_id.clone()))?;

    let turn = state
        .chat_service
        .respond(&history, &input.message, &input.model)
        .await?;

    state
        .sessions
        .set(&input.session_id, turn.messages.clone())
        .await?;

    tracing::info!(
        request_id = %ctx.request_id,
        session_id = %input.session_id,
        intent = %turn.intent,
        elapsed_ms = ctx.elapsed_ms(),
        "Chat turn completed"
    );

    Ok(ChatReply {
        reply: turn.reply,
        messages: turn.messages,
        session_id: input.session_id,
        model: input.model,
        intent: turn.intent,
    })
}

/// POST /api/v1/chat - Run one chat turn against a session.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ChatReply>>, RequestError> {
    let ctx = RequestContext::start();
    let request = ChatRequest::from_payload(payload, &ctx);

    let reply = run_turn(&state, request, &ctx)
        .await
        .map_err(|e| ctx.fail(e))?;

    let messages_link = format!("/api/v1/sessions/{}/messages", reply.session_id);
    Ok(Json(ctx.success(reply).with_link("messages", &messages_link)))
}
