//! HostedInferenceProvider -- concrete [`InferenceProvider`] for a hosted
//! text-generation endpoint.
//!
//! POSTs `{inputs, parameters}` with a bearer token and reads the first
//! `generated_text` of the list-shaped response. The token is held as a
//! [`SecretString`] and only exposed when building the request header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use absher_core::llm::provider::InferenceProvider;
use absher_types::config::LlmConfig;
use absher_types::llm::{GeneratedText, InferenceRequest, LlmError};

use crate::secret::env::EnvSecretProvider;

/// Extra time the HTTP client allows beyond the gateway timeout, so a slow
/// endpoint always surfaces as the gateway's `Timeout`.
const CLIENT_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// HTTP client timeout for a configured gateway timeout.
pub fn client_timeout(config: &LlmConfig) -> Duration {
    Duration::from_secs(config.timeout_secs) + CLIENT_TIMEOUT_SLACK
}

/// Hosted text-generation provider.
///
/// Does not derive Debug; the token must never be printed.
pub struct HostedInferenceProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    api_key_env: String,
    endpoint: String,
}

impl HostedInferenceProvider {
    /// Build a provider. A missing `api_key` is not an error here; it is
    /// reported as [`LlmError::MissingApiKey`] on the first call.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<SecretString>,
        api_key_env: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            api_key_env: api_key_env.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Build from config, reading the token from the configured env var.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = EnvSecretProvider::new().get(&config.api_key_env);
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "No inference API token configured; assistant replies will report the missing token"
            );
        }
        Self::new(
            config.endpoint.clone(),
            api_key,
            config.api_key_env.clone(),
            client_timeout(config),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl InferenceProvider for HostedInferenceProvider {
    fn name(&self) -> &str {
        "hosted"
    }

    async fn generate(&self, request: &InferenceRequest) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| LlmError::MissingApiKey(self.api_key_env.clone()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Inference endpoint returned an error");
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let generated: Vec<GeneratedText> = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        generated
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or(LlmError::EmptyResponse)
    }
}
