//! Identity lookup and name-change workflow.
//!
//! A linear, step-gated flow: choose an identification method, look the
//! user up, enter the new name, confirm, verify the OTP. Steps only move
//! forward; a failed step leaves the workflow where it was.

use serde::Serialize;

use absher_types::error::WorkflowError;
use absher_types::transaction::{TransactionRecord, TransactionStatus};
use absher_types::user::UserRecord;
use absher_types::workflow::{IdMethod, NameChangeStep};

use crate::directory::UserDirectory;
use crate::otp::{OtpChallenge, VerificationMode};
use crate::transaction::TransactionLog;

/// Action tag recorded for completed name changes.
pub const NAME_CHANGE_ACTION: &str = "name_change";

/// New names must be longer than this many characters.
const MIN_NAME_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct NameChangeWorkflow {
    step: NameChangeStep,
    method: Option<IdMethod>,
    user: Option<UserRecord>,
    new_name: Option<String>,
    otp: Option<OtpChallenge>,
    transaction: Option<TransactionRecord>,
}

/// Serializable snapshot of the workflow for display.
///
/// The OTP code itself is never part of the snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct NameChangeView {
    pub step: NameChangeStep,
    pub method: Option<IdMethod>,
    pub profile: Option<UserRecord>,
    pub new_name: Option<String>,
    pub otp_issued: bool,
    pub transaction: Option<TransactionRecord>,
}

impl NameChangeWorkflow {
    pub fn new() -> Self {
        Self {
            step: NameChangeStep::SelectMethod,
            method: None,
            user: None,
            new_name: None,
            otp: None,
            transaction: None,
        }
    }

    pub fn step(&self) -> NameChangeStep {
        self.step
    }

    /// Profile found by the lookup step.
    pub fn profile(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn new_name(&self) -> Option<&str> {
        self.new_name.as_deref()
    }

    /// Record logged on completion.
    pub fn transaction(&self) -> Option<&TransactionRecord> {
        self.transaction.as_ref()
    }

    pub fn view(&self) -> NameChangeView {
        NameChangeView {
            step: self.step,
            method: self.method,
            profile: self.user.clone(),
            new_name: self.new_name.clone(),
            otp_issued: self.otp.is_some(),
            transaction: self.transaction.clone(),
        }
    }

    fn require(&self, attempted: NameChangeStep) -> Result<(), WorkflowError> {
        if self.step == attempted {
            Ok(())
        } else {
            Err(WorkflowError::OutOfOrder {
                current: self.step,
                attempted,
            })
        }
    }

    /// Step 1: choose national ID or residency ID.
    pub fn select_method(&mut self, method: IdMethod) -> Result<(), WorkflowError> {
        self.require(NameChangeStep::SelectMethod)?;
        self.method = Some(method);
        self.step = NameChangeStep::Lookup;
        Ok(())
    }

    /// Step 2: exact-match lookup on the chosen identifier field.
    pub fn lookup(&mut self, directory: &UserDirectory, id: &str) -> Result<&UserRecord, WorkflowError> {
        self.require(NameChangeStep::Lookup)?;
        let method = self.method.unwrap_or(IdMethod::NationalId);
        let id = id.trim();

        let user = directory
            .find_by(method.lookup_field(), id)
            .ok_or_else(|| WorkflowError::UserNotFound {
                method,
                id: id.to_string(),
            })?;

        tracing::info!(method = %method, "Identity lookup succeeded");
        self.step = NameChangeStep::EnterName;
        Ok(self.user.insert(user.clone()))
    }

    /// Step 3: the new name, trimmed, must be longer than two characters.
    pub fn submit_new_name(&mut self, name: &str) -> Result<(), WorkflowError> {
        self.require(NameChangeStep::EnterName)?;
        let name = name.trim();
        if name.chars().count() <= MIN_NAME_CHARS {
            return Err(WorkflowError::NameTooShort);
        }
        self.new_name = Some(name.to_string());
        self.step = NameChangeStep::Confirm;
        Ok(())
    }

    /// Step 4: explicit confirmation. Issues the OTP.
    pub fn confirm(&mut self, confirmed: bool) -> Result<&OtpChallenge, WorkflowError> {
        self.require(NameChangeStep::Confirm)?;
        if !confirmed {
            return Err(WorkflowError::NotConfirmed);
        }
        self.step = NameChangeStep::VerifyOtp;
        Ok(self.otp.insert(OtpChallenge::issue()))
    }

    /// Step 5: verify the OTP and log the completed change.
    pub fn verify_otp(
        &mut self,
        input: &str,
        mode: VerificationMode,
        log: &mut TransactionLog,
    ) -> Result<TransactionRecord, WorkflowError> {
        self.require(NameChangeStep::VerifyOtp)?;
        let verified = self
            .otp
            .as_ref()
            .is_some_and(|otp| otp.verify(input, mode));
        if !verified {
            return Err(WorkflowError::InvalidOtp);
        }

        let user = self.user.as_ref();
        let user_id = user.and_then(UserRecord::user_id).unwrap_or_default();
        let old_name = user.map(current_name).unwrap_or_default();
        let new_name = self.new_name.as_deref().unwrap_or_default();

        let record = log
            .append(
                user_id,
                NAME_CHANGE_ACTION,
                TransactionStatus::Completed,
                format!("{old_name} -> {new_name}"),
            )
            .clone();

        tracing::info!(txn = %record.transaction_id, "Name change completed");
        self.step = NameChangeStep::Completed;
        self.transaction = Some(record.clone());
        Ok(record)
    }

    /// Test hook: replace the issued OTP with a known code.
    #[cfg(test)]
    fn set_otp(&mut self, code: &str) {
        self.otp = Some(OtpChallenge::with_code(code));
    }
}

impl Default for NameChangeWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

/// Arabic name if present, else English.
fn current_name(user: &UserRecord) -> &str {
    match user.name_ar() {
        "" => user.name_en(),
        ar => ar,
    }
}
