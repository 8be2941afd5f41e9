//! Session persistence for chat histories.
//!
//! `SessionStore` is the four-operation port the HTTP layer talks to;
//! `InMemorySessionStore` is the process-lifetime implementation.

pub mod memory;
pub mod store;
