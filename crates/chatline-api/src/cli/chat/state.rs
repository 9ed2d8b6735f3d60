//! Local state of the interactive chat client.
//!
//! The backend owns the canonical conversation; this holds a disposable copy
//! that is replaced wholesale after every successful request. Nothing is
//! added optimistically.

use chatline_core::chat::stats::{ConversationStats, TIMELINE_LEN, recent_timeline};
use chatline_types::message::ChatMessage;

use crate::client::ClientError;

#[derive(Debug, Default)]
pub struct ClientState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    /// A submission is in flight.
    pub loading: bool,
    /// Blocking error shown until the user presses a key.
    pub alert: Option<String>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the result of the initial history fetch.
    ///
    /// Failures are logged and otherwise ignored; the list stays empty.
    pub fn load_history(&mut self, result: Result<Vec<ChatMessage>, ClientError>) {
        match result {
            Ok(messages) => self.messages = messages,
            Err(e) => tracing::warn!(error = %e, "Failed to load chat history"),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Mark a submission in flight and return the content to send.
    ///
    /// Returns `None` when the guard rejects the submission.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.loading = true;
        Some(self.input.clone())
    }

    /// Apply the result of a submission.
    ///
    /// On success the list is replaced and the input cleared. On failure the
    /// input is kept and an alert raised. The in-flight flag is cleared
    /// either way.
    pub fn finish_submit(&mut self, result: Result<Vec<ChatMessage>, ClientError>) {
        self.loading = false;
        match result {
            Ok(messages) => {
                self.messages = messages;
                self.input.clear();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to send message");
                self.alert = Some(format!("Failed to send message: {e}"));
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn stats(&self) -> ConversationStats {
        ConversationStats::from_messages(&self.messages)
    }

    pub fn timeline(&self) -> Vec<&ChatMessage> {
        recent_timeline(&self.messages, TIMELINE_LEN)
    }
}
