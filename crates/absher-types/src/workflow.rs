//! Name-change workflow types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the applicant identifies themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdMethod {
    NationalId,
    ResidencyId,
}

impl IdMethod {
    /// User record field matched during lookup.
    pub fn lookup_field(&self) -> &'static str {
        match self {
            IdMethod::NationalId => "national_id",
            IdMethod::ResidencyId => "residency_id",
        }
    }
}

impl fmt::Display for IdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdMethod::NationalId => write!(f, "national_id"),
            IdMethod::ResidencyId => write!(f, "residency_id"),
        }
    }
}

impl FromStr for IdMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "national_id" => Ok(IdMethod::NationalId),
            "residency_id" | "iqama" => Ok(IdMethod::ResidencyId),
            other => Err(format!("invalid identification method: '{other}'")),
        }
    }
}

/// Position in the name-change flow. Steps only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameChangeStep {
    SelectMethod,
    Lookup,
    EnterName,
    Confirm,
    VerifyOtp,
    Completed,
}

impl fmt::Display for NameChangeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NameChangeStep::SelectMethod => "select_method",
            NameChangeStep::Lookup => "lookup",
            NameChangeStep::EnterName => "enter_name",
            NameChangeStep::Confirm => "confirm",
            NameChangeStep::VerifyOtp => "verify_otp",
            NameChangeStep::Completed => "completed",
        };
        f.write_str(s)
    }
}
