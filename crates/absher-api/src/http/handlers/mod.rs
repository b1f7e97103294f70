//! HTTP request handlers for the REST API.

pub mod assistant;
pub mod autofill;
pub mod chat;
pub mod comparison;
pub mod name_change;
pub mod service;
pub mod session;
pub mod transaction;
pub mod user;

use uuid::Uuid;

use absher_types::error::SessionError;
use absher_types::service::ServiceType;

use crate::http::error::AppError;
use crate::state::{AppState, SessionHandle};

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// Look up a registered session by its path id.
pub(crate) fn find_session(state: &AppState, id: &str) -> Result<(Uuid, SessionHandle), AppError> {
    let id = parse_uuid(id)?;
    let handle = state.session(&id).ok_or(SessionError::NotFound)?;
    Ok((id, handle))
}

/// Parse a service tag from a path or query parameter.
pub(crate) fn parse_service(tag: &str) -> Result<ServiceType, AppError> {
    tag.parse::<ServiceType>().map_err(AppError::NotFound)
}

/// Reject empty (after trimming) text inputs.
pub(crate) fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("'{field}' must not be empty")));
    }
    Ok(trimmed)
}
