//! HTTP client for a running Chatline backend.
//!
//! Used by the `chat`, `history` and `send` commands. Mirrors the two
//! endpoints: fetch the conversation, submit a message. Either call returns
//! the full conversation, which callers use to replace their local copy.

use chatline_types::api::{ErrorResponse, MessageListResponse, SubmitMessageRequest};
use chatline_types::message::ChatMessage;

/// Backend URL used when neither `--url` nor `CHATLINE_URL` is given.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Errors talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a usable response (connection, decoding).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Thin client over the `/api/messages` endpoints.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn messages_url(&self) -> String {
        format!("{}/api/messages", self.base_url)
    }

    /// GET /api/messages
    pub async fn fetch_messages(&self) -> Result<Vec<ChatMessage>, ClientError> {
        let response = self.http.get(self.messages_url()).send().await?;
        Self::decode(response).await
    }

    /// POST /api/messages
    pub async fn send_message(&self, content: &str) -> Result<Vec<ChatMessage>, ClientError> {
        let body = SubmitMessageRequest {
            content: Some(content.to_string()),
        };
        let response = self.http.post(self.messages_url()).json(&body).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Vec<ChatMessage>, ClientError> {
        let status = response.status();
        if status.is_success() {
            let list: MessageListResponse = response.json().await?;
            return Ok(list.messages);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use chatline_core::chat::service::ChatService;
    use chatline_core::llm::box_provider::BoxLlmProvider;
    use chatline_infra::llm::unconfigured::UnconfiguredProvider;
    use chatline_infra::store::InMemoryMessageStore;
    use chatline_types::config::LlmConfig;
    use chatline_types::message::{MessageRole, ReplySource};

    use super::*;
    use crate::http::router::build_router;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_send_message_posts_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/messages"))
            .and(body_json(json!({ "content": "hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [
                    {"id": 1, "role": "user", "content": "hello", "createdAt": "2026-10-17T09:30:00.000Z"},
                    {"id": 2, "role": "assistant", "content": "hi", "createdAt": "2026-10-17T09:30:01.000Z", "replySource": "model"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::new(&format!("{}/", server.uri()));
        let messages = client.send_message("hello").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].reply_source, Some(ReplySource::Model));
    }

    #[tokio::test]
    async fn test_error_body_becomes_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/messages"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": "Message content is required" })),
            )
            .mount(&server)
            .await;

        let err = ChatClient::new(&server.uri()).send_message(" ").await.unwrap_err();
        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Message content is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_error() {
        // Bind then drop a listener so the port is very likely closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ChatClient::new(&format!("http://{addr}"))
            .fetch_messages()
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[tokio::test]
    async fn test_end_to_end_against_router() {
        let service = ChatService::new(
            InMemoryMessageStore::new(),
            BoxLlmProvider::new(UnconfiguredProvider),
            &LlmConfig::default(),
        );
        let router = build_router(AppState::from_service(service));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = ChatClient::new(&format!("http://{addr}"));
        assert!(client.fetch_messages().await.unwrap().is_empty());

        let messages = client.send_message("hello").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert!(messages[1].content.contains("hello"));
        assert_eq!(messages[1].reply_source, Some(ReplySource::Fallback));

        assert_eq!(client.fetch_messages().await.unwrap(), messages);
    }
}
