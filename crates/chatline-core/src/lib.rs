//! Business logic and port definitions for Chatline.
//!
//! This crate defines the "ports" (the message store and LLM provider
//! traits) that the infrastructure layer implements, plus the chat service
//! that drives a conversation turn. It depends only on `chatline-types` --
//! never on `chatline-infra` or any IO crate.

pub mod chat;
pub mod llm;
pub mod store;
