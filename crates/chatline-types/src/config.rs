//! Configuration types for Chatline.
//!
//! `ChatConfig` represents the optional `chatline.toml` that controls the
//! listen address and the completion provider settings. The API key is not
//! part of it: credentials come from the environment only.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Chatline backend.
///
/// All fields have sensible defaults, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Interface to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Completion provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            llm: LlmConfig::default(),
        }
    }
}

/// Settings for the OpenAI-compatible completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Instruction prepended to every outbound conversation.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Upper bound on a single completion call. `None` leaves only the
    /// HTTP client's own limits in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_system_prompt() -> String {
    "You are a friendly helpful assistant.".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            system_prompt: default_system_prompt(),
            timeout_secs: None,
        }
    }
}
