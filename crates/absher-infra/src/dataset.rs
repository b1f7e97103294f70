//! Synthetic user dataset loader.
//!
//! The dataset is a JSON array of flat objects. It is read once at startup;
//! a missing or broken file degrades to an empty store rather than failing
//! the process.

use std::path::Path;

use serde_json::Value;

use absher_types::error::DatasetError;
use absher_types::user::UserRecord;

/// Load and validate every record in the dataset at `path`.
pub async fn load_users(path: &Path) -> Result<Vec<UserRecord>, DatasetError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(DatasetError::NotFound(path.display().to_string()));
        }
        Err(err) => return Err(DatasetError::Io(err.to_string())),
    };

    parse_users(&content)
}

/// Parse a dataset document. Every array entry must be a JSON object.
pub fn parse_users(content: &str) -> Result<Vec<UserRecord>, DatasetError> {
    let entries: Vec<Value> =
        serde_json::from_str(content).map_err(|e| DatasetError::Parse(e.to_string()))?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(UserRecord::new(fields)),
            _ => Err(DatasetError::Malformed { index }),
        })
        .collect()
}

/// Like [`load_users`], but any failure yields an empty list and a warning.
pub async fn load_users_or_empty(path: &Path) -> Vec<UserRecord> {
    match load_users(path).await {
        Ok(users) => {
            tracing::info!(count = users.len(), path = %path.display(), "Loaded user dataset");
            users
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "{err}, continuing with an empty user store");
            Vec::new()
        }
    }
}
