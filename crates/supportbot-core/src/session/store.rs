//! SessionStore trait definition.
//!
//! Follows the same RPITIT pattern as `LlmProvider`, so a durable backend can
//! replace the in-memory store without changing callers.

use supportbot_types::chat::ChatMessage;
use supportbot_types::error::RepositoryError;

/// Keyed store of per-session chat histories.
///
/// Every operation must be atomic with respect to concurrent callers.
pub trait SessionStore: Send + Sync {
    /// Create a new, empty session and return its opaque id.
    fn create_session(
        &self,
    ) -> impl std::future::Future<Output = Result<String, RepositoryError>> + Send;

    /// Snapshot of a session's history, or `None` if the id is unknown.
    ///
    /// The returned vector is an independent copy; mutating it never affects
    /// stored state.
    fn get(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<ChatMessage>>, RepositoryError>> + Send;

    /// Replace a session's history wholesale.
    fn set(
        &self,
        session_id: &str,
        messages: Vec<ChatMessage>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Clear a session's history. Returns `false` (and creates nothing) if the id is unknown.
    fn reset(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
