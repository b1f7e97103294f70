//! Business logic for the Absher service assistant.
//!
//! Everything here is pure in-memory logic over `absher-types`: the service
//! catalog, keyword intent routing, the conversation manager, form auto-fill,
//! the name-change workflow, and the transaction log. The hosted inference
//! client is abstracted behind [`llm::provider::InferenceProvider`]; the
//! concrete HTTP implementation lives in `absher-infra`.

pub mod autofill;
pub mod catalog;
pub mod comparison;
pub mod conversation;
pub mod directory;
pub mod faq;
pub mod intent;
pub mod llm;
pub mod name_change;
pub mod otp;
pub mod session;
pub mod transaction;
