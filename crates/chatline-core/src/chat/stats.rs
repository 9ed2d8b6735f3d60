//! Read-only summaries derived from a conversation snapshot.
//!
//! Nothing here is cached: callers recompute from the list they hold every
//! time they render.

use chatline_types::message::ChatMessage;

/// Number of messages shown in the recent-activity timeline.
pub const TIMELINE_LEN: usize = 4;

/// Message counts by role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversationStats {
    pub total: usize,
    pub user: usize,
    pub assistant: usize,
}

impl ConversationStats {
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        Self {
            total: messages.len(),
            user: messages.iter().filter(|m| m.is_user()).count(),
            assistant: messages.iter().filter(|m| m.is_assistant()).count(),
        }
    }
}

/// The last `len` messages, newest first.
pub fn recent_timeline(messages: &[ChatMessage], len: usize) -> Vec<&ChatMessage> {
    messages.iter().rev().take(len).collect()
}
