//! Observability setup for SupportBot: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
