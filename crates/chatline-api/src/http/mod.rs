//! HTTP/REST API layer for Chatline.
//!
//! Axum-based REST API at `/api/` with permissive CORS so a browser client
//! served from another origin can talk to it.

pub mod error;
pub mod handlers;
pub mod router;
