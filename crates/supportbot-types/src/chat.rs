//! Chat message and routing types for SupportBot.
//!
//! A session's history is an ordered `Vec<ChatMessage>`, newest last.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a stored history entry.
///
/// The system prompt is never stored, so there is no system variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single turn entry in a support conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Build a user-authored message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Build an assistant-authored message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// What kind of handling an incoming message needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Answered from the static order table, no model call.
    OrderStatus,
    /// Answered by the LLM using the product catalog.
    ProductQuestion,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::OrderStatus => write!(f, "order_status"),
            Intent::ProductQuestion => write!(f, "product_question"),
        }
    }
}

/// Outcome of routing one user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// The assistant reply for this turn.
    pub reply: String,
    /// The full updated history, including the new user and assistant entries.
    pub messages: Vec<ChatMessage>,
    /// How the message was routed.
    pub intent: Intent,
}
