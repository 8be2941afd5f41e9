//! In-memory session store backed by `DashMap`.
//!
//! Histories are cloned on read so no `DashMap` guard outlives a call and
//! callers never hold a live reference into the table.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use supportbot_types::chat::ChatMessage;
use supportbot_types::error::RepositoryError;

use super::store::SessionStore;

/// Process-lifetime session store.
///
/// Cloning produces a shared view of the same underlying table (backed by `Arc`).
/// Sessions never expire.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<DashMap<String, Vec<ChatMessage>>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session has been created yet.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn create_session(&self) -> Result<String, RepositoryError> {
        let session_id = Uuid::now_v7().to_string();
        self.sessions.insert(session_id.clone(), Vec::new());
        debug!(session_id = %session_id, "Session created");
        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> Result<Option<Vec<ChatMessage>>, RepositoryError> {
        Ok(self.sessions.get(session_id).map(|r| r.value().clone()))
    }

    async fn set(
        &self,
        session_id: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<(), RepositoryError> {
        self.sessions.insert(session_id.to_string(), messages);
        Ok(())
    }

    async fn reset(&self, session_id: &str) -> Result<bool, RepositoryError> {
        match self.sessions.get_mut(session_id) {
            Some(mut entry) => {
                entry.value_mut().clear();
                debug!(session_id = %session_id, "Session reset");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
