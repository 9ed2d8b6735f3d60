//! Conversation handlers for the REST API.
//!
//! `GET /api/messages` lists the conversation; `POST /api/messages` runs a
//! chat turn. A turn answers 200 even when the completion provider failed:
//! the reply is then a fallback message, tagged `replySource: "fallback"`.
//!
//! The turn runs on its own task. If the client disconnects mid-turn the
//! request future is dropped, but the turn still appends its reply.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use chatline_core::chat::service::CONTENT_REQUIRED;
use chatline_types::api::{MessageListResponse, SubmitMessageRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/messages - Full conversation in append order.
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<MessageListResponse>, AppError> {
    let messages = state.chat_service.list_messages().await?;
    Ok(Json(MessageListResponse { messages }))
}

/// POST /api/messages - Submit user content and get the updated conversation.
///
/// A body that is not JSON, lacks `content`, or has a non-string `content`
/// is the same 400 as blank content.
pub async fn submit_message(
    State(state): State<AppState>,
    body: Result<Json<SubmitMessageRequest>, JsonRejection>,
) -> Result<Json<MessageListResponse>, AppError> {
    let content = match body {
        Ok(Json(SubmitMessageRequest { content: Some(content) })) => content,
        Ok(_) => return Err(AppError::Validation(CONTENT_REQUIRED.to_string())),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected message body");
            return Err(AppError::Validation(CONTENT_REQUIRED.to_string()));
        }
    };

    let chat_service = state.chat_service.clone();
    let turn = tokio::spawn(async move { chat_service.submit_message(&content).await });
    let messages = turn.await.map_err(|e| {
        tracing::error!(error = %e, "Chat turn task failed");
        AppError::Internal("chat turn failed".to_string())
    })??;
    Ok(Json(MessageListResponse { messages }))
}
