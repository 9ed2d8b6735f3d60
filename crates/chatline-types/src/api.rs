//! Wire shapes of the HTTP API, shared by the server and the client.

use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// Body of every successful `/api/messages` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<ChatMessage>,
}

/// Body of `POST /api/messages`.
///
/// `content` is optional on the wire so a missing field is reported as a
/// validation error rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitMessageRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
