//! Shared domain types for Chatline.
//!
//! This crate contains the types used across the Chatline workspace:
//! conversation messages, LLM request/response shapes, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod message;
