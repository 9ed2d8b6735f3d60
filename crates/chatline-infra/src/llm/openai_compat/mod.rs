//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] talks to OpenAI or any server that
//! speaks the chat completions protocol (local gateways, proxies) via a
//! configurable base URL.
//!
//! Uses [`async_openai`] for type-safe request/response handling.

pub mod config;

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use secrecy::ExposeSecret;

use chatline_core::llm::provider::LlmProvider;
use chatline_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole};

use self::config::OpenAiCompatConfig;

/// Unified provider for any OpenAI-compatible API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config).with_backoff(no_retry()),
            provider_name: config.provider_name,
            model: config.model,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(system_message(system));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => system_message(&msg.content),
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            };
            messages.push(oai_msg);
        }

        // Use the model from the request if set, otherwise fall back to config default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            ..Default::default()
        }
    }
}

/// One attempt per turn: a zero elapsed-time budget stops the client's
/// built-in retry of 429 and 5xx responses.
fn no_retry() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

fn system_message(text: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
        content: ChatCompletionRequestSystemMessageContent::Text(text.to_string()),
        name: None,
    })
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone());

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
///
/// Non-success statuses arrive as `ApiError`; `Reqwest` only carries
/// transport failures.
fn map_openai_error(err: OpenAIError) -> LlmError {
    match err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref();
            let error_type = api_err.r#type.as_deref();
            if code == Some("invalid_api_key") || error_type == Some("authentication_error") {
                LlmError::AuthenticationFailed
            } else if matches!(code, Some("rate_limit_exceeded" | "insufficient_quota"))
                || error_type == Some("rate_limit_error")
            {
                LlmError::RateLimited
            } else {
                LlmError::Provider {
                    message: api_err.to_string(),
                }
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg),
        other => LlmError::Provider {
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use chatline_core::chat::service::{ChatService, fallback_reply};
    use chatline_core::llm::box_provider::BoxLlmProvider;
    use chatline_types::config::LlmConfig;
    use chatline_types::llm::Message;
    use chatline_types::message::ReplySource;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::store::InMemoryMessageStore;

    fn provider_at(base_url: String, model: &str) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: "openai".into(),
            base_url,
            api_key: SecretString::from("sk-test".to_string()),
            model: model.into(),
        })
    }

    fn provider_for(server: &MockServer) -> OpenAiCompatibleProvider {
        provider_at(format!("{}/v1", server.uri()), "gpt-4o-mini")
    }

    async fn mount_completion(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }

    fn hello_request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![Message {
                role: MessageRole::User,
                content: "hello".to_string(),
            }],
            system: Some("You are a friendly helpful assistant.".to_string()),
        }
    }

    fn completion_body(content: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_provider_from_llm_config() {
        let llm = LlmConfig {
            model: "gpt-4o".into(),
            ..LlmConfig::default()
        };
        let provider =
            OpenAiCompatibleProvider::new(config::from_llm_config(&llm, SecretString::from("sk-test".to_string())));
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model, "gpt-4o");
    }

    #[test]
    fn test_build_request_messages() {
        let provider = provider_at("https://api.openai.com/v1".into(), "gpt-4o");
        let request = CompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                Message {
                    role: MessageRole::User,
                    content: "Hello".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "Hi there!".to_string(),
                },
            ],
            system: Some("Be helpful".to_string()),
        };

        let oai_req = provider.build_request(&request);
        assert_eq!(oai_req.model, "gpt-4o");
        // 1 system + 2 conversation = 3 messages
        assert_eq!(oai_req.messages.len(), 3);
        assert!(matches!(oai_req.messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(oai_req.messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(oai_req.messages[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(oai_req.stream.is_none());
    }

    #[test]
    fn test_build_request_empty_model_uses_default() {
        let provider = provider_at("https://api.openai.com/v1".into(), "gpt-4o-mini");
        let request = CompletionRequest {
            model: String::new(),
            messages: vec![],
            system: None,
        };

        let oai_req = provider.build_request(&request);
        assert_eq!(oai_req.model, "gpt-4o-mini");
        assert!(oai_req.messages.is_empty());
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("Hi there!"))))
            .expect(1)
            .mount(&server)
            .await;

        let response = provider_for(&server).complete(&hello_request()).await.unwrap();
        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.content.as_deref(), Some("Hi there!"));
        assert_eq!(response.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_complete_sends_system_then_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("ok"))))
            .mount(&server)
            .await;

        provider_for(&server).complete(&hello_request()).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are a friendly helpful assistant.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
    }

    #[tokio::test]
    async fn test_complete_null_content_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!(null))))
            .mount(&server)
            .await;

        let response = provider_for(&server).complete(&hello_request()).await.unwrap();
        assert!(response.content.is_none());
    }

    #[tokio::test]
    async fn test_complete_rejected_key_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "message": "Incorrect API key provided: sk-test.",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(&hello_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed), "got {err:?}");
    }

    #[tokio::test]
    async fn test_complete_malformed_body_is_deserialization_error() {
        let server = MockServer::start().await;
        mount_completion(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

        let err = provider_for(&server).complete(&hello_request()).await.unwrap_err();
        assert!(
            matches!(err, LlmError::Deserialization(ref msg) if msg.contains("not json")),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_complete_wrong_shape_is_deserialization_error() {
        let server = MockServer::start().await;
        mount_completion(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })),
        )
        .await;

        let err = provider_for(&server).complete(&hello_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let server = MockServer::start().await;
        mount_completion(
            &server,
            ResponseTemplate::new(429).set_body_json(json!({
                "error": {
                    "message": "Rate limit reached for gpt-4o-mini.",
                    "type": "requests",
                    "param": null,
                    "code": "rate_limit_exceeded"
                }
            })),
        )
        .await;

        let err = provider_for(&server).complete(&hello_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited), "got {err:?}");
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        mount_completion(&server, ResponseTemplate::new(503).set_body_string("upstream unavailable")).await;

        let err = provider_for(&server).complete(&hello_request()).await.unwrap_err();
        assert!(
            matches!(err, LlmError::Provider { ref message } if message.contains("upstream unavailable")),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_chat_turn_with_malformed_completion_falls_back() {
        let server = MockServer::start().await;
        mount_completion(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

        let service = ChatService::new(
            InMemoryMessageStore::new(),
            BoxLlmProvider::new(provider_for(&server)),
            &LlmConfig::default(),
        );
        let messages = service.submit_message("hello").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, fallback_reply("hello"));
        assert_eq!(messages[1].reply_source, Some(ReplySource::Fallback));
    }

    #[test]
    fn test_map_openai_error_api_auth() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Incorrect API key provided".to_string(),
            r#type: Some("authentication_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn test_map_openai_error_rate_limit() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Rate limit exceeded".to_string(),
            r#type: Some("rate_limit_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[test]
    fn test_map_openai_error_invalid_argument() {
        use async_openai::error::OpenAIError;
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }
}
