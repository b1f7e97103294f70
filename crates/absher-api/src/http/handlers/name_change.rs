//! Name-change workflow HTTP handlers.
//!
//! Endpoints (all under /api/v1/sessions/{id}/name-change):
//! - GET            - Current workflow state
//! - POST /method   - Choose national ID or residency ID
//! - POST /lookup   - Look the applicant up
//! - POST /name     - Enter the new name
//! - POST /confirm  - Confirm the change, issuing the OTP
//! - POST /verify   - Verify the OTP and complete the change
//! - POST /restart  - Start a new change; the transaction log is kept
//!
//! A failed step returns an error and leaves the workflow unchanged.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use absher_core::name_change::NameChangeView;
use absher_core::session::PortalSession;
use absher_types::transaction::TransactionRecord;
use absher_types::workflow::IdMethod;

use crate::http::error::AppError;
use crate::http::handlers::find_session;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

fn workflow_links(resp: ApiResponse<NameChangeView>, id: &str) -> ApiResponse<NameChangeView> {
    resp.with_link("self", &format!("/api/v1/sessions/{id}/name-change"))
}

/// GET /api/v1/sessions/{id}/name-change - Current workflow state.
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<NameChangeView>>, AppError> {
    let timer = RequestTimer::start();
    let (_, handle) = find_session(&state, &session_id)?;
    let view = handle.lock().await.name_change.view();

    Ok(Json(workflow_links(timer.finish(view), &session_id)))
}

#[derive(Debug, Deserialize)]
pub struct MethodRequest {
    pub method: IdMethod,
}

/// POST .../name-change/method
pub async fn select_method(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<MethodRequest>,
) -> Result<Json<ApiResponse<NameChangeView>>, AppError> {
    let timer = RequestTimer::start();
    let (_, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    session.name_change.select_method(body.method)?;

    Ok(Json(workflow_links(
        timer.finish(session.name_change.view()),
        &session_id,
    )))
}

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub id: String,
}

/// POST .../name-change/lookup
pub async fn lookup(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<LookupRequest>,
) -> Result<Json<ApiResponse<NameChangeView>>, AppError> {
    let timer = RequestTimer::start();
    let (_, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    session.name_change.lookup(&state.directory, &body.id)?;

    Ok(Json(workflow_links(
        timer.finish(session.name_change.view()),
        &session_id,
    )))
}

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// POST .../name-change/name
pub async fn submit_name(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<NameRequest>,
) -> Result<Json<ApiResponse<NameChangeView>>, AppError> {
    let timer = RequestTimer::start();
    let (_, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    session.name_change.submit_new_name(&body.name)?;

    Ok(Json(workflow_links(
        timer.finish(session.name_change.view()),
        &session_id,
    )))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub confirmed: bool,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub workflow: NameChangeView,
    /// Stand-in for SMS delivery: the issued code is returned to the caller.
    pub simulated_otp: String,
}

/// POST .../name-change/confirm
pub async fn confirm(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<ConfirmRequest>,
) -> Result<Json<ApiResponse<ConfirmResponse>>, AppError> {
    let timer = RequestTimer::start();
    let (_, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    let simulated_otp = session.name_change.confirm(body.confirmed)?.code().to_string();

    Ok(Json(
        timer
            .finish(ConfirmResponse {
                workflow: session.name_change.view(),
                simulated_otp,
            })
            .with_link("verify", &format!("/api/v1/sessions/{session_id}/name-change/verify")),
    ))
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub code: String,
}

/// POST .../name-change/verify
pub async fn verify(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<ApiResponse<TransactionRecord>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    let PortalSession {
        name_change,
        transactions,
        verification_mode,
        ..
    } = &mut *session;
    let record = name_change.verify_otp(&body.code, *verification_mode, transactions)?;
    tracing::info!(session_id = %id, txn = %record.transaction_id, "Name change verified");

    Ok(Json(
        timer
            .finish(record)
            .with_link("transactions", &format!("/api/v1/sessions/{id}/transactions")),
    ))
}

/// POST .../name-change/restart - Begin another change in the same session.
pub async fn restart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<NameChangeView>>, AppError> {
    let timer = RequestTimer::start();
    let (_, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    session.restart_name_change();

    Ok(Json(workflow_links(
        timer.finish(session.name_change.view()),
        &session_id,
    )))
}
