//! Stand-in provider used when no API key is available.
//!
//! Every call fails with [`LlmError::NotConfigured`] without touching the
//! network, so the chat service answers each turn with its fallback reply.

use chatline_core::llm::provider::LlmProvider;
use chatline_types::llm::{CompletionRequest, CompletionResponse, LlmError};

#[derive(Debug, Default)]
pub struct UnconfiguredProvider;

impl LlmProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::NotConfigured)
    }
}
