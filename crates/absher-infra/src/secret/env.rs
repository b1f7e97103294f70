//! Environment variable secret provider.
//!
//! Read-only: secrets come from the process environment and are wrapped in
//! [`SecretString`] immediately so they never reach `Debug` output or logs.

use secrecy::SecretString;

/// Environment variable secret provider.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Read the secret stored in environment variable `key`.
    ///
    /// Unset, empty, and non-Unicode values are all treated as absent.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(key, "Ignoring non-Unicode secret value");
                None
            }
        }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
