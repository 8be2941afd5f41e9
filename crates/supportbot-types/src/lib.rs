//! Shared domain types for SupportBot.
//!
//! This crate contains the core domain types used across the SupportBot backend:
//! chat messages, catalog products, LLM request/response shapes, service
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
