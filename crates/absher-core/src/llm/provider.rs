//! InferenceProvider trait definition.

use absher_types::llm::{InferenceRequest, LlmError};

/// A text-generation backend.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The hosted
/// HTTP implementation lives in absher-infra (`HostedInferenceProvider`).
pub trait InferenceProvider: Send + Sync {
    /// Human-readable provider name, used in logs.
    fn name(&self) -> &str;

    /// Run one generation and return the raw generated text, which may
    /// still contain the echoed prompt.
    fn generate(
        &self,
        request: &InferenceRequest,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
