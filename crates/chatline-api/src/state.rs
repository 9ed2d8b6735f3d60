//! Application state wiring the chat service together.
//!
//! `ChatService` is generic over its store; AppState pins it to the
//! in-memory store from chatline-infra.

use std::sync::Arc;

use secrecy::SecretString;

use chatline_core::chat::service::ChatService;
use chatline_infra::llm::create_provider;
use chatline_infra::store::InMemoryMessageStore;
use chatline_types::config::ChatConfig;

/// Concrete type alias for the service generic pinned to the infra store.
pub type ConcreteChatService = ChatService<InMemoryMessageStore>;

/// Shared state handed to every REST handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Wire an empty in-memory conversation to the configured provider.
    pub fn init(config: &ChatConfig, api_key: Option<SecretString>) -> Self {
        let provider = create_provider(&config.llm, api_key);
        let chat_service = ChatService::new(InMemoryMessageStore::new(), provider, &config.llm);
        Self::from_service(chat_service)
    }

    pub fn from_service(chat_service: ConcreteChatService) -> Self {
        Self {
            chat_service: Arc::new(chat_service),
        }
    }
}
