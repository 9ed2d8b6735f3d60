//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined
//! in `chatline-core`, and a factory ([`create_provider`]) that picks one
//! from the `[llm]` configuration and the resolved credential.
//!
//! [`LlmProvider`]: chatline_core::llm::provider::LlmProvider

pub mod openai_compat;
pub mod unconfigured;

use secrecy::SecretString;

use chatline_core::llm::box_provider::BoxLlmProvider;
use chatline_types::config::LlmConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::unconfigured::UnconfiguredProvider;

/// Create a [`BoxLlmProvider`] from the `[llm]` configuration.
///
/// With no API key the returned provider fails every call, which the chat
/// service turns into fallback replies; the server stays usable.
pub fn create_provider(config: &LlmConfig, api_key: Option<SecretString>) -> BoxLlmProvider {
    match api_key {
        Some(key) => {
            let oai_config = openai_compat::config::from_llm_config(config, key);
            tracing::info!(
                base_url = %oai_config.base_url,
                model = %oai_config.model,
                "Using OpenAI-compatible provider"
            );
            BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY is not set; every reply will be a fallback reply");
            BoxLlmProvider::new(UnconfiguredProvider)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_with_key() {
        let provider = create_provider(&LlmConfig::default(), Some(SecretString::from("sk-test".to_string())));
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_without_key() {
        let provider = create_provider(&LlmConfig::default(), None);
        assert_eq!(provider.name(), "unconfigured");
    }
}
