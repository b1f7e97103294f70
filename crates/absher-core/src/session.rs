//! Per-visitor portal session.
//!
//! Bundles the conversation, the name-change workflow, and the transaction
//! log. Sessions share nothing mutable; the catalog and router are shared
//! read-only.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use absher_types::error::SessionError;
use absher_types::service::ServiceType;
use absher_types::user::UserRecord;

use crate::catalog::ServiceCatalog;
use crate::conversation::ConversationManager;
use crate::directory::UserDirectory;
use crate::intent::IntentRouter;
use crate::name_change::NameChangeWorkflow;
use crate::otp::VerificationMode;
use crate::transaction::TransactionLog;

#[derive(Debug, Clone)]
pub struct PortalSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub conversation: ConversationManager,
    pub name_change: NameChangeWorkflow,
    pub transactions: TransactionLog,
    pub verification_mode: VerificationMode,
}

impl PortalSession {
    pub fn new(
        catalog: Arc<ServiceCatalog>,
        router: Arc<IntentRouter>,
        verification_mode: VerificationMode,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            conversation: ConversationManager::new(catalog, router),
            name_change: NameChangeWorkflow::new(),
            transactions: TransactionLog::new(),
            verification_mode,
        }
    }

    /// Start over: fresh conversation, workflow, and log. The id is kept.
    pub fn reset(&mut self) {
        self.conversation.reset();
        self.name_change = NameChangeWorkflow::new();
        self.transactions = TransactionLog::new();
        tracing::debug!(session_id = %self.id, "Session reset");
    }

    /// Begin a new name change, keeping the conversation and the
    /// transaction log. Allowed at any step, including after completion.
    pub fn restart_name_change(&mut self) {
        let previous = self.name_change.step();
        self.name_change = NameChangeWorkflow::new();
        tracing::debug!(session_id = %self.id, %previous, "Name change restarted");
    }

    /// Make the `index`-th user of `service` the current profile.
    pub fn select_user(
        &mut self,
        directory: &UserDirectory,
        service: ServiceType,
        index: usize,
    ) -> Result<&UserRecord, SessionError> {
        let available = directory.by_service(service).len();
        let user = directory
            .get(service, index)
            .ok_or_else(|| SessionError::UserIndexOutOfRange {
                service: service.to_string(),
                index,
                available,
            })?;

        self.conversation.set_current_user(user.clone());
        self.conversation
            .current_user()
            .ok_or(SessionError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use absher_types::transaction::TransactionStatus;
    use absher_types::workflow::{IdMethod, NameChangeStep};
    use serde_json::json;

    fn session() -> PortalSession {
        PortalSession::new(
            Arc::new(ServiceCatalog::standard()),
            Arc::new(IntentRouter::standard()),
            VerificationMode::Demo,
        )
    }

    fn directory() -> UserDirectory {
        UserDirectory::new(
            serde_json::from_value(json!([
                {"service_type": "VEHICLE_REGISTRATION", "name_en": "Sara", "national_id": "1099887766"},
                {"service_type": "NATIONAL_ID", "name_en": "Ahmed", "national_id": "1122334455"}
            ]))
            .unwrap(),
        )
    }

    #[test]
    fn select_user_sets_current_profile() {
        let dir = directory();
        let mut s = session();
        assert_eq!(
            s.select_user(&dir, ServiceType::Vehicle, 0).unwrap().name_en(),
            "Sara"
        );
        assert_eq!(s.conversation.current_user().unwrap().name_en(), "Sara");
    }

    #[test]
    fn select_user_out_of_range() {
        let dir = directory();
        let mut s = session();
        let err = s.select_user(&dir, ServiceType::Iqama, 0).unwrap_err();
        assert!(matches!(
            err,
            SessionError::UserIndexOutOfRange { available: 0, .. }
        ));
        assert!(s.conversation.current_user().is_none());
    }

    #[test]
    fn reset_clears_state_but_keeps_id() {
        let mut s = session();
        let id = s.id;
        s.conversation.process_query("vehicle registration");
        s.name_change.select_method(IdMethod::NationalId).unwrap();
        s.transactions
            .append("u", "name_change", TransactionStatus::Completed, "");

        s.reset();

        assert_eq!(s.id, id);
        assert!(s.conversation.turns().is_empty());
        assert!(s.conversation.current_service().is_none());
        assert_eq!(s.name_change.step(), NameChangeStep::SelectMethod);
        assert!(s.transactions.is_empty());
    }

    #[test]
    fn restart_name_change_keeps_earlier_records() {
        let dir = directory();
        let mut s = session();

        for new_name in ["Ahmed Ali", "Ahmed Saleh"] {
            s.restart_name_change();
            s.name_change.select_method(IdMethod::NationalId).unwrap();
            s.name_change.lookup(&dir, "1122334455").unwrap();
            s.name_change.submit_new_name(new_name).unwrap();
            s.name_change.confirm(true).unwrap();
            s.name_change
                .verify_otp("xxxxxx", s.verification_mode, &mut s.transactions)
                .unwrap();
            assert_eq!(s.name_change.step(), NameChangeStep::Completed);
        }

        let details: Vec<_> = s.transactions.records().iter().map(|r| r.details.as_str()).collect();
        assert_eq!(details, ["Ahmed -> Ahmed Ali", "Ahmed -> Ahmed Saleh"]);
    }

    #[test]
    fn restart_mid_flow_returns_to_first_step() {
        let dir = directory();
        let mut s = session();
        s.conversation.process_query("vehicle");
        s.name_change.select_method(IdMethod::NationalId).unwrap();
        s.name_change.lookup(&dir, "1122334455").unwrap();

        s.restart_name_change();

        assert_eq!(s.name_change.step(), NameChangeStep::SelectMethod);
        assert!(s.name_change.profile().is_none());
        assert_eq!(s.conversation.turns().len(), 2);
    }

    #[test]
    fn sessions_are_independent() {
        let mut a = session();
        let b = session();
        a.conversation.process_query("iqama renewal");
        assert_ne!(a.id, b.id);
        assert!(b.conversation.turns().is_empty());
    }
}
