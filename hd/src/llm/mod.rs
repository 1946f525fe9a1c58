//! Reasoner client module
//!
//! Provides text completion requests against a configured provider.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod openai;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, StopReason};

use crate::config::LlmConfig;

/// Create a Reasoner client based on the provider specified in config
///
/// Supports "openai" and "anthropic" providers.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model(), "create_client: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        "anthropic" => {
            debug!("create_client: creating Anthropic client");
            Ok(Arc::new(AnthropicClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: openai, anthropic",
                other
            )))
        }
    }
}

/// Send one prompt and return the reply text as given
///
/// Blank text is returned unchanged; only a reply with no text content at
/// all is an error.
pub async fn ask(llm: &dyn LlmClient, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
    debug!(prompt_len = prompt.len(), %max_tokens, "ask: called");
    let response = llm.complete(CompletionRequest::new(prompt, max_tokens)).await?;
    match response.content {
        Some(text) => {
            debug!(reply_len = text.len(), stop_reason = ?response.stop_reason, "ask: reply received");
            Ok(text)
        }
        None => {
            debug!("ask: reply without text");
            Err(LlmError::InvalidResponse("Reasoner returned no text".to_string()))
        }
    }
}
