//! Shared domain types for the Absher service assistant.
//!
//! This crate contains the types used across the workspace: service
//! definitions, synthetic user records, conversation turns, transaction
//! records, auto-filled forms, inference payloads, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod form;
pub mod llm;
pub mod service;
pub mod transaction;
pub mod user;
pub mod workflow;
