//! HTTP/REST API layer for SupportBot.
//!
//! Axum-based REST API at `/api/v1/` with the envelope response format, the
//! unversioned `/api` routes the web client calls, and configurable CORS.

pub mod context;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
