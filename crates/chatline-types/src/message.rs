//! Conversation message types.
//!
//! A [`ChatMessage`] is one turn of the single global conversation. The wire
//! shape is camelCase (`id`, `role`, `content`, `createdAt`, `replySource`)
//! so browser clients written against the JSON contract keep working.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// Where the text of an assistant message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// Real completion text returned by the provider.
    Model,
    /// The provider answered without text; a placeholder was substituted.
    Empty,
    /// The provider call failed; the fallback template was substituted.
    Fallback,
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySource::Model => write!(f, "model"),
            ReplySource::Empty => write!(f, "empty"),
            ReplySource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A single message in the conversation.
///
/// `id` is an epoch-millisecond based identifier that is strictly
/// increasing in list order. Assistant replies carry `reply_source`;
/// user messages never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub role: MessageRole,
    pub content: String,
    #[serde(with = "millis_rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_source: Option<ReplySource>,
}

impl ChatMessage {
    /// Build a user message stamped with the current time.
    pub fn user(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            role: MessageRole::User,
            content: content.into(),
            created_at: Utc::now(),
            reply_source: None,
        }
    }

    /// Build an assistant message stamped with the current time.
    pub fn assistant(id: i64, content: impl Into<String>, source: ReplySource) -> Self {
        Self {
            id,
            role: MessageRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
            reply_source: Some(source),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}

/// `createdAt` as RFC 3339 with millisecond precision and a `Z` suffix,
/// e.g. `2026-10-17T09:30:00.123Z`.
mod millis_rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
