//! Observability setup for Chatline: structured logging via `tracing`.

pub mod tracing_setup;
