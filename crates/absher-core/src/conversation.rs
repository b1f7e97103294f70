//! Conversation manager for the multi-service assistant.
//!
//! Holds the append-only turn log plus the current-service and current-user
//! pointers for one session. Each incoming query is classified; matched
//! queries get a templated service overview, unmatched ones a FAQ answer.

use std::fmt::Write as _;
use std::sync::Arc;

use absher_types::chat::ConversationTurn;
use absher_types::service::{ServiceDefinition, ServiceType};
use absher_types::user::UserRecord;

use crate::catalog::ServiceCatalog;
use crate::faq;
use crate::intent::IntentRouter;

/// Number of workflow steps shown in a service overview.
const PREVIEW_STEPS: usize = 3;

/// Per-session conversation state.
#[derive(Debug, Clone)]
pub struct ConversationManager {
    catalog: Arc<ServiceCatalog>,
    router: Arc<IntentRouter>,
    turns: Vec<ConversationTurn>,
    current_service: Option<ServiceType>,
    current_user: Option<UserRecord>,
    /// Set at construction; chat never advances it.
    workflow_step: usize,
}

impl ConversationManager {
    pub fn new(catalog: Arc<ServiceCatalog>, router: Arc<IntentRouter>) -> Self {
        Self {
            catalog,
            router,
            turns: Vec::new(),
            current_service: None,
            current_user: None,
            workflow_step: 0,
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn current_service(&self) -> Option<ServiceType> {
        self.current_service
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.current_user.as_ref()
    }

    pub fn workflow_step(&self) -> usize {
        self.workflow_step
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn set_current_user(&mut self, user: UserRecord) {
        self.current_user = Some(user);
    }

    /// Handle one user query and return the assistant reply.
    ///
    /// Both the user turn and the reply are appended to the log.
    pub fn process_query(&mut self, query: &str) -> String {
        self.turns.push(ConversationTurn::user(query));

        let intent = self.router.classify(query);
        let reply = match intent.service {
            Some(service) => {
                self.current_service = Some(service);
                render_service_overview(self.catalog.get(service))
            }
            None => faq::answer(query).to_string(),
        };

        self.turns
            .push(ConversationTurn::assistant(reply.clone(), self.current_service));
        reply
    }

    /// Record an exchange whose reply was produced elsewhere (hosted
    /// inference). The reply is stored as-is, error text included.
    pub fn record_exchange(&mut self, message: &str, reply: &str) {
        self.turns.push(ConversationTurn::user(message));
        self.turns
            .push(ConversationTurn::assistant(reply, self.current_service));
    }

    /// Drop the turn log and both pointers.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.current_service = None;
        self.current_user = None;
        self.workflow_step = 0;
    }
}

/// Markdown overview of a service: names, description, documents, time,
/// cost, and the first workflow steps.
pub fn render_service_overview(service: &ServiceDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "🎯 **Service: {}** ({})\n",
        service.name_en, service.name_ar
    );
    let _ = writeln!(out, "📋 **Overview:**\n{}\n", service.description_en);
    out.push_str("📄 **Required Documents:**\n");
    for doc in &service.required_documents {
        let _ = writeln!(out, "• {doc}");
    }
    let _ = writeln!(out, "\n⏱️ **Processing Time:** {}", service.processing_time);
    let _ = writeln!(out, "💰 **Cost:** {}\n", service.cost);
    out.push_str("📝 **Next Steps:**\n");
    for step in service.workflow.iter().take(PREVIEW_STEPS) {
        let _ = writeln!(out, "{step}");
    }
    out.push_str(
        "\n✅ **Ready to proceed?**\n\
         I can help you:\n\
         1. Answer questions about requirements\n\
         2. Pre-fill your form with profile data\n\
         3. Schedule an appointment\n\
         4. Track your application status\n\n\
         What would you like to do next?\n",
    );
    out
}
