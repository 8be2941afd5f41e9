//! Conversation routing and the chat service facade.
//!
//! `ConversationRouter` holds the per-turn state machine; `ChatService`
//! binds it to a provider and catalog chosen at startup.

pub mod router;
pub mod service;
