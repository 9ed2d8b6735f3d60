//! Configuration for the OpenAI-compatible provider.

use secrecy::SecretString;

use chatline_types::config::LlmConfig;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`]. Deliberately not
/// `Debug`: it carries the API key.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Default model identifier, used when a request leaves `model` empty.
    pub model: String,
}

/// Configuration taken from the `[llm]` table, keyed by the given secret.
pub fn from_llm_config(config: &LlmConfig, api_key: SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: config.base_url.trim_end_matches('/').to_string(),
        api_key,
        model: config.model.clone(),
    }
}
