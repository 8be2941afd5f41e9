//! Infrastructure layer for SupportBot.
//!
//! Concrete adapters behind the ports defined in `supportbot-core`: the
//! OpenAI-compatible completion client, the product catalog file loader, and
//! the TOML service configuration loader.

pub mod catalog;
pub mod config;
pub mod llm;
