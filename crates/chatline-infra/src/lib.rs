//! Infrastructure layer for Chatline.
//!
//! Contains implementations of the traits defined in `chatline-core`:
//! the in-memory message store and the OpenAI-compatible completion
//! provider, plus configuration and credential loading.

pub mod config;
pub mod llm;
pub mod store;
