//! Form auto-fill and application submission.
//!
//! Endpoints:
//! - POST /api/v1/sessions/{id}/autofill      - Pre-fill a form from the current profile
//! - POST /api/v1/sessions/{id}/applications  - Submit an auto-filled application

use axum::Json;
use axum::extract::{Path, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use absher_core::autofill::{ApplicationReceipt, auto_fill, submit_application};
use absher_core::session::PortalSession;
use absher_types::form::FormField;
use absher_types::service::ServiceType;

use crate::http::error::AppError;
use crate::http::handlers::find_session;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AutoFillRequest {
    /// Defaults to the selected user's service, then the chat's service.
    pub service: Option<ServiceType>,
}

#[derive(Debug, Serialize)]
pub struct AutoFillView {
    pub service: ServiceType,
    pub fields: Vec<FormField>,
}

/// Service for a form: explicit, else the selected profile's own service,
/// else whatever the conversation is about.
fn form_service(session: &PortalSession, requested: Option<ServiceType>) -> Result<ServiceType, AppError> {
    requested
        .or_else(|| {
            session
                .conversation
                .current_user()
                .and_then(|u| u.service_type())
        })
        .or_else(|| session.conversation.current_service())
        .ok_or_else(|| AppError::Validation("No service selected".to_string()))
}

/// POST /api/v1/sessions/{id}/autofill - Pre-fill the application form.
pub async fn autofill_form(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<AutoFillRequest>,
) -> Result<Json<ApiResponse<AutoFillView>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;

    let session = handle.lock().await;
    let service = form_service(&session, body.service)?;
    let form = auto_fill(service, session.conversation.current_user())?;

    Ok(Json(
        timer
            .finish(AutoFillView {
                service,
                fields: form.fields,
            })
            .with_link("submit", &format!("/api/v1/sessions/{id}/applications")),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub service: Option<ServiceType>,
    #[serde(default)]
    pub documents_uploaded: u32,
    pub appointment_date: NaiveDate,
}

/// POST /api/v1/sessions/{id}/applications - Submit the application.
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<ApplicationRequest>,
) -> Result<Json<ApiResponse<ApplicationReceipt>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    let service = form_service(&session, body.service)?;
    let today = chrono::Utc::now().date_naive();

    let PortalSession {
        conversation,
        transactions,
        ..
    } = &mut *session;
    let receipt = submit_application(
        service,
        conversation.current_user(),
        body.documents_uploaded,
        body.appointment_date,
        today,
        transactions,
    )?;

    Ok(Json(
        timer
            .finish(receipt)
            .with_link("transactions", &format!("/api/v1/sessions/{id}/transactions")),
    ))
}
