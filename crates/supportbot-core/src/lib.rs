//! Message routing and conversation-state logic for SupportBot.
//!
//! This crate defines the "ports" (the `LlmProvider` and `SessionStore`
//! traits) plus the pure decision logic: intent classification, order
//! lookup, and prompt construction. It depends only on `supportbot-types` --
//! never on `supportbot-infra` or any network/IO crate.

pub mod chat;
pub mod intent;
pub mod llm;
pub mod order;
pub mod prompt;
pub mod session;
