use thiserror::Error;

use crate::workflow::{IdMethod, NameChangeStep};

/// Errors loading the synthetic user dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error("failed to read dataset: {0}")]
    Io(String),

    #[error("failed to parse dataset: {0}")]
    Parse(String),

    #[error("dataset entry {index} is not an object")]
    Malformed { index: usize },
}

/// Errors from form auto-fill and application submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutoFillError {
    #[error("No user profile loaded")]
    NoUser,

    #[error("documents uploaded must be between 0 and {max}, got {got}")]
    DocumentCount { max: u32, got: u32 },

    #[error("appointment date {0} is in the past")]
    AppointmentInPast(String),
}

/// Errors from the name-change workflow.
///
/// A failed operation never advances the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("step '{attempted}' is not available at step '{current}'")]
    OutOfOrder {
        current: NameChangeStep,
        attempted: NameChangeStep,
    },

    #[error("no user found with {method} '{id}'")]
    UserNotFound { method: IdMethod, id: String },

    #[error("new name must be longer than 2 characters")]
    NameTooShort,

    #[error("the change must be explicitly confirmed")]
    NotConfirmed,

    #[error("invalid verification code")]
    InvalidOtp,
}

/// Errors from session bookkeeping.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,

    #[error("user index {index} out of range for {service} ({available} available)")]
    UserIndexOutOfRange {
        service: String,
        index: usize,
        available: usize,
    },
}
