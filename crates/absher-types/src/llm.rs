//! Hosted inference request/response types.
//!
//! These model the text-generation endpoint used by the free-form assistant:
//! a single prompt string plus sampling parameters in, a list of generated
//! texts out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub do_sample: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 512,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            do_sample: true,
        }
    }
}

/// Request body: `{ inputs, parameters }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

/// One element of the list-shaped response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Errors from the hosted inference endpoint or the gateway around it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    #[error("API returned status code {status}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("response contained no generated text")]
    EmptyResponse,

    #[error("no API token configured (set {0})")]
    MissingApiKey(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("request cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = InferenceRequest {
            inputs: "hello".to_string(),
            parameters: GenerationParameters::default(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "hello");
        assert_eq!(json["parameters"]["max_new_tokens"], 512);
        assert_eq!(json["parameters"]["top_k"], 50);
        assert_eq!(json["parameters"]["do_sample"], true);
    }

    #[test]
    fn test_response_parse() {
        let body = r#"[{"generated_text": "hi there"}]"#;
        let parsed: Vec<GeneratedText> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed[0].generated_text, "hi there");
    }

    #[test]
    fn test_status_error_display() {
        let err = LlmError::Status {
            status: 503,
            body: "loading".to_string(),
        };
        assert_eq!(err.to_string(), "API returned status code 503");
    }
}
