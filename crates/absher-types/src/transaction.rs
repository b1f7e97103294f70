//! Transaction records.
//!
//! One record is appended per completed workflow action. Records live in
//! memory only and are lost when the session ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a logged action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(TransactionStatus::Completed),
            "pending" => Ok(TransactionStatus::Pending),
            "failed" => Ok(TransactionStatus::Failed),
            other => Err(format!("invalid transaction status: '{other}'")),
        }
    }
}

/// A single logged action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// `TXN{YYYYMMDDHHMMSS}-{4 digits}`.
    pub transaction_id: String,
    pub user_id: String,
    /// Action tag, e.g. `name_change`.
    pub action: String,
    pub status: TransactionStatus,
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub details: String,
}
