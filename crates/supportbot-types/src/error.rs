use thiserror::Error;

use crate::llm::LlmError;

/// A chat request field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("session_id is required")]
    MissingSession,

    #[error("message must be a non-empty string")]
    Message,

    #[error("model must be a non-empty string")]
    Model,
}

impl InvalidInput {
    /// Short snake_case code used by the legacy `/api` error body.
    pub fn code(&self) -> &'static str {
        match self {
            InvalidInput::MissingSession => "missing_session",
            InvalidInput::Message => "invalid_message",
            InvalidInput::Model => "invalid_model",
        }
    }
}

/// Errors surfaced by a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The caller supplied an invalid request shape.
    #[error(transparent)]
    Validation(#[from] InvalidInput),

    /// The LLM provider failed, timed out, or returned nothing usable.
    #[error("upstream failure: {0}")]
    Upstream(#[from] LlmError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from session store operations (used by trait definitions in supportbot-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("session store connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors raised while loading the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog root must be a JSON array")]
    NotAnArray,

    #[error("catalog entry {index} is malformed: {reason}")]
    MalformedEntry { index: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_is_message_only() {
        let err: ChatError = InvalidInput::Message.into();
        assert_eq!(err.to_string(), "message must be a non-empty string");
    }

    #[test]
    fn test_invalid_input_codes() {
        assert_eq!(InvalidInput::MissingSession.code(), "missing_session");
        assert_eq!(InvalidInput::Model.to_string(), "model must be a non-empty string");
        assert_eq!(InvalidInput::Model.code(), "invalid_model");
    }

    #[test]
    fn test_upstream_from_llm_error() {
        let err: ChatError = LlmError::AuthenticationFailed.into();
        assert!(matches!(err, ChatError::Upstream(LlmError::AuthenticationFailed)));
        assert_eq!(err.to_string(), "upstream failure: authentication failed");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("lock poisoned".to_string());
        assert_eq!(err.to_string(), "query error: lock poisoned");
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::MalformedEntry {
            index: 2,
            reason: "missing required field 'id'".to_string(),
        };
        assert!(err.to_string().contains("entry 2"));
    }
}
