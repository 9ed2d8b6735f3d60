use thiserror::Error;

/// Errors from message store operations (used by trait definitions in chatline-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message id {id} does not follow last id {last}")]
    NonMonotonicId { id: i64, last: i64 },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors surfaced by chat operations.
///
/// Upstream (LLM provider) failures are deliberately absent: they are
/// recovered inside the chat service and never reach the caller.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
