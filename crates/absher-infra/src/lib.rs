//! Infrastructure layer for Absher.
//!
//! IO-facing implementations: the JSON user dataset loader, the TOML
//! config loader and data-dir resolution, environment-variable secrets,
//! and the hosted inference HTTP client implementing
//! `absher_core::llm::provider::InferenceProvider`.

pub mod config;
pub mod dataset;
pub mod llm;
pub mod secret;
