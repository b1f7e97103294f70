//! One-time passcode challenge for the name-change confirmation step.
//!
//! This is a demonstration gate, not a security control: codes are never
//! delivered anywhere and live only in session memory.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of every issued code.
pub const OTP_LENGTH: usize = 6;

/// How strictly a submitted code is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// Only the issued code is accepted.
    #[default]
    Strict,
    /// The issued code or any input of exactly six characters is accepted.
    Demo,
}

impl VerificationMode {
    pub fn from_demo_flag(demo_mode: bool) -> Self {
        if demo_mode {
            VerificationMode::Demo
        } else {
            VerificationMode::Strict
        }
    }
}

/// An issued code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    code: String,
}

impl OtpChallenge {
    /// Issue a fresh random 6-digit code.
    pub fn issue() -> Self {
        let n: u32 = rand::rng().random_range(100_000..=999_999);
        Self {
            code: n.to_string(),
        }
    }

    /// Challenge with a known code.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Surrounding whitespace is ignored when comparing against the issued
    /// code; the demo length rule counts the raw input.
    pub fn verify(&self, input: &str, mode: VerificationMode) -> bool {
        if input.trim() == self.code {
            return true;
        }
        match mode {
            VerificationMode::Strict => false,
            VerificationMode::Demo => input.chars().count() == OTP_LENGTH,
        }
    }
}
