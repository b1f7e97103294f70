//! Assistant gateway: prompt assembly, bounded generation, reply cleanup.
//!
//! One call per user message. No retries and no streaming; the call is
//! bounded by a timeout and can be cancelled by the caller.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use absher_types::config::LlmConfig;
use absher_types::llm::{GenerationParameters, InferenceRequest, LlmError};

use super::provider::InferenceProvider;

pub struct AssistantGateway<P> {
    provider: P,
    parameters: GenerationParameters,
    system_prompt: String,
    delimiter: String,
    timeout: Duration,
}

impl<P: InferenceProvider> AssistantGateway<P> {
    pub fn new(provider: P, config: &LlmConfig) -> Self {
        Self {
            provider,
            parameters: config.parameters(),
            system_prompt: config.system_prompt.clone(),
            delimiter: config.response_delimiter.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// `<s>[INST] {system_prompt}\n\nUser: {message} [/INST]`
    pub fn build_prompt(&self, message: &str) -> String {
        format!("<s>[INST] {}\n\nUser: {message} [/INST]", self.system_prompt)
    }

    /// Drop the echoed prompt: everything up to and including the last
    /// delimiter, if one is present.
    pub fn strip_delimiter(&self, generated: &str) -> String {
        let text = match generated.rsplit_once(self.delimiter.as_str()) {
            Some((_, after)) if !self.delimiter.is_empty() => after,
            _ => generated,
        };
        text.trim().to_string()
    }

    /// Generate a reply to `message`.
    ///
    /// Fails with `Timeout` when the provider does not answer in time and
    /// `Cancelled` when `cancel` fires first.
    #[tracing::instrument(skip_all, fields(provider = self.provider.name()))]
    pub async fn ask(&self, message: &str, cancel: &CancellationToken) -> Result<String, LlmError> {
        let request = InferenceRequest {
            inputs: self.build_prompt(message),
            parameters: self.parameters.clone(),
        };

        let call = tokio::time::timeout(self.timeout, self.provider.generate(&request));
        let generated = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Generation cancelled");
                return Err(LlmError::Cancelled);
            }
            result = call => match result {
                Ok(inner) => inner?,
                Err(_) => {
                    tracing::warn!(timeout_secs = self.timeout.as_secs(), "Generation timed out");
                    return Err(LlmError::Timeout(self.timeout.as_secs()));
                }
            },
        };

        Ok(self.strip_delimiter(&generated))
    }
}

/// Render a gateway result as the text shown to the user.
///
/// Failures become reply strings rather than errors so the exchange can
/// still be recorded in the conversation.
pub fn reply_text(result: Result<String, LlmError>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => format!("Error: {err}"),
    }
}
