//! Chat service running one conversation turn end to end.
//!
//! A turn appends the user message, sends the whole conversation to the
//! completion provider, and appends exactly one assistant reply. Provider
//! failures never escape a turn: the reply degrades to a placeholder or a
//! fallback text and the caller always receives the updated conversation.
//! The reply's [`ReplySource`] records which of the three happened.

use std::time::Duration;

use chatline_types::config::LlmConfig;
use chatline_types::error::ChatError;
use chatline_types::llm::{CompletionRequest, CompletionResponse, LlmError, Message};
use chatline_types::message::{ChatMessage, ReplySource};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::llm::box_provider::BoxLlmProvider;
use crate::store::MessageStore;

/// Error text for a submission without usable content.
pub const CONTENT_REQUIRED: &str = "Message content is required";

/// Reply text used when the provider answers without any text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "I could not generate a response.";

/// Reply text used when the provider call fails.
///
/// Echoes the user's content verbatim so the conversation still reflects
/// what was received.
pub fn fallback_reply(content: &str) -> String {
    format!("Fallback reply (AI error). I still received your message: \"{content}\"")
}

/// Pick the id for a new user message.
///
/// Epoch milliseconds, bumped past the last stored id so ids stay strictly
/// increasing even when two turns land in the same millisecond. The paired
/// reply takes the returned id + 1.
pub fn next_user_id(last_id: Option<i64>, now_ms: i64) -> i64 {
    match last_id {
        Some(last) => now_ms.max(last + 1),
        None => now_ms,
    }
}

/// Orchestrates chat turns over a message store and a completion provider.
///
/// Generic over `MessageStore` to maintain clean architecture
/// (chatline-core never depends on chatline-infra).
pub struct ChatService<S: MessageStore> {
    store: S,
    provider: BoxLlmProvider,
    model: String,
    system_prompt: String,
    timeout: Option<Duration>,
    /// Held for a whole turn so a user message and its reply are adjacent.
    turn_lock: Mutex<()>,
}

impl<S: MessageStore> ChatService<S> {
    /// Create a chat service using the model, prompt and timeout from `config`.
    pub fn new(store: S, provider: BoxLlmProvider, config: &LlmConfig) -> Self {
        Self {
            store,
            provider,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            turn_lock: Mutex::new(()),
        }
    }

    /// Override the completion timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the provider replies are requested from.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Return the full conversation in append order. Never mutates state.
    pub async fn list_messages(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.store.list().await?)
    }

    /// Run one chat turn and return the full updated conversation.
    ///
    /// Rejects content that is empty after trimming with
    /// [`ChatError::Validation`] before touching the store. Otherwise appends
    /// the user message (as submitted, untrimmed) and exactly one assistant
    /// reply, whether or not the provider call succeeded.
    ///
    /// Both ids are allocated from the store's last id while the turn lock is
    /// held, so neither append can fail the store's ordering check. A store
    /// error on the reply append would leave the user message unanswered.
    ///
    /// Dropping the returned future mid-turn has the same effect; callers
    /// that may be cancelled should run the turn on its own task.
    pub async fn submit_message(&self, content: &str) -> Result<Vec<ChatMessage>, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::Validation(CONTENT_REQUIRED.to_string()));
        }

        let _turn = self.turn_lock.lock().await;

        let user_id = next_user_id(self.store.last_id().await?, Utc::now().timestamp_millis());
        let user_message = ChatMessage::user(user_id, content);
        self.store.append(&user_message).await?;

        let history = self.store.list().await?;
        let request = self.build_request(&history);
        let (reply_text, source) = self.generate_reply(&request, content).await;

        let reply = ChatMessage::assistant(user_id + 1, reply_text, source);
        self.store.append(&reply).await?;

        info!(user_id, reply_source = %source, "Chat turn completed");

        Ok(self.store.list().await?)
    }

    /// System instruction followed by every stored message.
    fn build_request(&self, history: &[ChatMessage]) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: history
                .iter()
                .map(|m| Message {
                    role: m.role,
                    content: m.content.clone(),
                })
                .collect(),
            system: Some(self.system_prompt.clone()),
        }
    }

    async fn generate_reply(&self, request: &CompletionRequest, content: &str) -> (String, ReplySource) {
        match self.call_provider(request).await {
            Ok(response) => match response.content.filter(|text| !text.is_empty()) {
                Some(text) => {
                    debug!(response_id = %response.id, model = %response.model, "Completion received");
                    (text, ReplySource::Model)
                }
                None => {
                    warn!(response_id = %response.id, "Completion contained no text, using placeholder");
                    (EMPTY_REPLY_PLACEHOLDER.to_string(), ReplySource::Empty)
                }
            },
            Err(e) => {
                error!(
                    provider = %self.provider.name(),
                    error = %e,
                    "Completion request failed, using fallback reply"
                );
                (fallback_reply(content), ReplySource::Fallback)
            }
        }
    }

    async fn call_provider(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.complete(request))
                .await
                .unwrap_or(Err(LlmError::Timeout(limit))),
            None => self.provider.complete(request).await,
        }
    }
}
