//! MessageStore trait definition.
//!
//! The conversation is a single ordered list; the store only needs to
//! append and list. Uses native async fn in traits (RPITIT).

use chatline_types::error::StoreError;
use chatline_types::message::ChatMessage;

/// Append-only storage for the conversation.
///
/// Implementations live in chatline-infra (e.g., `InMemoryMessageStore`).
/// Implementations must reject a message whose id is not greater than the
/// last stored id.
pub trait MessageStore: Send + Sync {
    /// Return every message, in append order.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, StoreError>> + Send;

    /// Append a message to the end of the conversation.
    fn append(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Id of the most recently appended message, if any.
    fn last_id(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<i64>, StoreError>> + Send;
}
