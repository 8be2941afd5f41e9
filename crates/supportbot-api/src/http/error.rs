//! Application error type mapping to HTTP status codes and response bodies.
//!
//! [`AppError`] is the classification. It reaches the client through one of
//! two wrappers: [`RequestError`] renders the `/api/v1` envelope and
//! [`LegacyError`] renders the `{"error": {"message", "code"}}` body used by
//! the unversioned `/api` routes. Both carry the id of the request that failed.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use supportbot_types::error::{ChatError, InvalidInput, RepositoryError};
use supportbot_types::llm::LlmError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Validation(InvalidInput),
    SessionNotFound(String),
    /// The LLM provider failed; details stay in the logs.
    Upstream(LlmError),
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Validation(invalid) => AppError::Validation(invalid),
            ChatError::Upstream(err) => AppError::Upstream(err),
            ChatError::Repository(err) => err.into(),
        }
    }
}

impl From<InvalidInput> for AppError {
    fn from(e: InvalidInput) -> Self {
        AppError::Validation(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope code and client-facing message.
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::Validation(invalid) => ("VALIDATION_ERROR", invalid.to_string()),
            AppError::SessionNotFound(_) => {
                ("SESSION_NOT_FOUND", "session_id not found".to_string())
            }
            AppError::Upstream(_) => (
                "UPSTREAM_ERROR",
                "The language model request failed".to_string(),
            ),
            AppError::Internal(_) => ("INTERNAL_ERROR", "Internal server error".to_string()),
        }
    }

    /// snake_case code for the legacy error body.
    fn legacy_code(&self) -> &'static str {
        match self {
            AppError::Validation(invalid) => invalid.code(),
            AppError::SessionNotFound(_) => "session_not_found",
            AppError::Upstream(_) => "upstream_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn log(&self, request_id: &str) {
        match self {
            AppError::Upstream(err) => {
                tracing::error!(request_id = %request_id, error = %err, "LLM request failed");
            }
            AppError::Internal(msg) => {
                tracing::error!(request_id = %request_id, error = %msg, "Unhandled error");
            }
            AppError::Validation(invalid) => {
                tracing::debug!(request_id = %request_id, "Rejected request: {invalid}");
            }
            AppError::SessionNotFound(id) => {
                tracing::debug!(request_id = %request_id, session_id = %id, "Unknown session");
            }
        }
    }
}

/// An [`AppError`] tied to the request that raised it, rendered as the envelope.
#[derive(Debug)]
pub struct RequestError {
    pub request_id: String,
    pub elapsed_ms: u64,
    pub error: AppError,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        self.error.log(&self.request_id);
        let (code, message) = self.error.code_and_message();
        ApiResponse::error(code, &message, self.request_id, self.elapsed_ms).into_response()
    }
}

/// An [`AppError`] rendered as `{"error": {"message", "code"}}`.
#[derive(Debug)]
pub struct LegacyError {
    pub request_id: String,
    pub error: AppError,
}

impl IntoResponse for LegacyError {
    fn into_response(self) -> Response {
        self.error.log(&self.request_id);
        let (_, message) = self.error.code_and_message();
        let body = json!({
            "error": {
                "message": message,
                "code": self.error.legacy_code(),
            }
        });
        (self.error.status(), Json(body)).into_response()
    }
}
