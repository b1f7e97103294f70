//! Portal configuration types.
//!
//! `PortalConfig` represents the `config.toml` in the data directory that
//! controls the dataset location, the hosted inference endpoint, the
//! verification mode, and the API listener. All fields have defaults.

use serde::{Deserialize, Serialize};

use crate::llm::GenerationParameters;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Path to the synthetic user dataset. Relative paths resolve against
    /// the data directory.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub verification: VerificationConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_dataset_path() -> String {
    "synthetic_users_1000.json".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            llm: LlmConfig::default(),
            verification: VerificationConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Hosted inference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    /// Name of the environment variable holding the bearer token.
    pub api_key_env: String,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub do_sample: bool,
    /// Upper bound on one generation call.
    pub timeout_secs: u64,
    pub system_prompt: String,
    /// Marker after which the generated text starts (the echoed prompt is
    /// stripped up to and including it).
    pub response_delimiter: String,
}

impl LlmConfig {
    pub fn parameters(&self) -> GenerationParameters {
        GenerationParameters {
            max_new_tokens: self.max_new_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            do_sample: self.do_sample,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        let params = GenerationParameters::default();
        Self {
            endpoint: "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2"
                .to_string(),
            api_key_env: "HF_API_TOKEN".to_string(),
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            do_sample: params.do_sample,
            timeout_secs: 60,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            response_delimiter: "[/INST]".to_string(),
        }
    }
}

/// System prompt for the free-form assistant.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant for the Absher \
government services portal. You help users with name change requests, identity \
verification questions, and general service guidance. Answer briefly and clearly, in \
the language the user writes in. This is a demonstration using synthetic data only.";

/// OTP verification behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Accept any 6-character input as a valid OTP. Demo use only.
    pub demo_mode: bool,
}

/// REST API listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Sessions untouched for this long are dropped by the idle sweep.
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_idle_secs: 1800,
        }
    }
}
