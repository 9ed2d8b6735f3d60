//! Conversation handling for Chatline.
//!
//! `service` runs a chat turn against the store and provider; `stats`
//! derives the read-only summary a client shows next to the conversation.

pub mod service;
pub mod stats;
