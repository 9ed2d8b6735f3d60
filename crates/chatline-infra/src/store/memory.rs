//! Process-memory implementation of [`MessageStore`].
//!
//! The conversation lives in a `Vec` behind a `tokio::sync::RwLock` and is
//! lost when the process exits. Readers never block each other; an append
//! takes the write lock only for the push itself.

use tokio::sync::RwLock;

use chatline_core::store::MessageStore;
use chatline_types::error::StoreError;
use chatline_types::message::ChatMessage;

/// In-memory conversation store.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<Vec<ChatMessage>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStore for InMemoryMessageStore {
    async fn list(&self) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self.messages.read().await.clone())
    }

    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let mut messages = self.messages.write().await;
        if let Some(last) = messages.last() {
            if message.id <= last.id {
                return Err(StoreError::NonMonotonicId {
                    id: message.id,
                    last: last.id,
                });
            }
        }
        messages.push(message.clone());
        tracing::trace!(id = message.id, role = %message.role, "Message appended");
        Ok(())
    }

    async fn last_id(&self) -> Result<Option<i64>, StoreError> {
        Ok(self.messages.read().await.last().map(|m| m.id))
    }
}

#[cfg(test)]
mod tests {
    use chatline_types::message::ReplySource;

    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = InMemoryMessageStore::new();
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.last_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = InMemoryMessageStore::new();
        store.append(&ChatMessage::user(10, "hello")).await.unwrap();
        store
            .append(&ChatMessage::assistant(11, "hi", ReplySource::Model))
            .await
            .unwrap();

        let messages = store.list().await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].content, "hi");
        assert_eq!(store.last_id().await.unwrap(), Some(11));
    }

    #[tokio::test]
    async fn test_append_rejects_non_increasing_id() {
        let store = InMemoryMessageStore::new();
        store.append(&ChatMessage::user(10, "first")).await.unwrap();

        let err = store.append(&ChatMessage::user(10, "dup")).await.unwrap_err();
        assert!(matches!(err, StoreError::NonMonotonicId { id: 10, last: 10 }));

        let err = store.append(&ChatMessage::user(3, "older")).await.unwrap_err();
        assert!(matches!(err, StoreError::NonMonotonicId { id: 3, last: 10 }));

        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_returns_snapshot() {
        let store = InMemoryMessageStore::new();
        store.append(&ChatMessage::user(1, "a")).await.unwrap();
        let snapshot = store.list().await.unwrap();
        store.append(&ChatMessage::user(2, "b")).await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }
}
