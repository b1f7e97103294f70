//! Conversation turn types.
//!
//! A conversation is an append-only list of [`ConversationTurn`]s scoped to
//! one portal session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::service::ServiceType;

/// First code point of the Arabic block (U+0600).
const ARABIC_BLOCK_START: u32 = 0x0600;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// Detected language of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
}

impl Language {
    /// `Ar` if any character falls at or above the Arabic block, else `En`.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(|c| c as u32 >= ARABIC_BLOCK_START) {
            Language::Ar
        } else {
            Language::En
        }
    }
}

/// One entry in a session's conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub timestamp: DateTime<Utc>,
    pub role: TurnRole,
    pub message: String,
    /// Set on user turns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Set on assistant turns: the service in focus when the reply was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceType>,
}

impl ConversationTurn {
    /// A user turn stamped now, with its language detected.
    pub fn user(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            timestamp: Utc::now(),
            role: TurnRole::User,
            language: Some(Language::detect(&message)),
            message,
            service: None,
        }
    }

    /// An assistant turn stamped now.
    pub fn assistant(message: impl Into<String>, service: Option<ServiceType>) -> Self {
        Self {
            timestamp: Utc::now(),
            role: TurnRole::Assistant,
            message: message.into(),
            language: None,
            service,
        }
    }
}
