//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions             - Create a session
//! - GET    /api/v1/sessions/{id}        - Session summary
//! - DELETE /api/v1/sessions/{id}        - Discard a session
//! - POST   /api/v1/sessions/{id}/reset  - Clear conversation, workflow and log
//! - PUT    /api/v1/sessions/{id}/user   - Select the current user profile
//! - GET    /api/v1/sessions/{id}/turns  - Conversation log

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use absher_core::otp::VerificationMode;
use absher_core::session::PortalSession;
use absher_types::chat::ConversationTurn;
use absher_types::error::SessionError;
use absher_types::service::ServiceType;
use absher_types::user::UserRecord;
use absher_types::workflow::NameChangeStep;

use crate::http::error::AppError;
use crate::http::handlers::find_session;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Session summary returned by most session endpoints.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub current_service: Option<ServiceType>,
    pub current_user: Option<UserRecord>,
    pub workflow_step: usize,
    pub turn_count: usize,
    pub transaction_count: usize,
    pub name_change_step: NameChangeStep,
    pub verification_mode: VerificationMode,
}

impl From<&PortalSession> for SessionView {
    fn from(s: &PortalSession) -> Self {
        Self {
            id: s.id,
            created_at: s.created_at,
            current_service: s.conversation.current_service(),
            current_user: s.conversation.current_user().cloned(),
            workflow_step: s.conversation.workflow_step(),
            turn_count: s.conversation.turns().len(),
            transaction_count: s.transactions.len(),
            name_change_step: s.name_change.step(),
            verification_mode: s.verification_mode,
        }
    }
}

fn session_links(resp: ApiResponse<SessionView>, id: &Uuid) -> ApiResponse<SessionView> {
    resp.with_link("self", &format!("/api/v1/sessions/{id}"))
        .with_link("chat", &format!("/api/v1/sessions/{id}/chat"))
        .with_link("name_change", &format!("/api/v1/sessions/{id}/name-change"))
        .with_link("transactions", &format!("/api/v1/sessions/{id}/transactions"))
}

/// POST /api/v1/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<SessionView>>) {
    let timer = RequestTimer::start();
    let (id, handle) = state.create_session();
    let view = SessionView::from(&*handle.lock().await);

    (
        StatusCode::CREATED,
        Json(session_links(timer.finish(view), &id)),
    )
}

/// GET /api/v1/sessions/{id} - Session summary.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;
    let view = SessionView::from(&*handle.lock().await);

    Ok(Json(session_links(timer.finish(view), &id)))
}

/// DELETE /api/v1/sessions/{id} - Discard a session and everything in it.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let (id, _) = find_session(&state, &session_id)?;
    if !state.remove_session(&id) {
        return Err(SessionError::NotFound.into());
    }

    Ok(Json(timer.finish(serde_json::json!({ "deleted": true, "id": id }))))
}

/// POST /api/v1/sessions/{id}/reset - Start over, keeping the session id.
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    session.reset();
    let view = SessionView::from(&*session);

    Ok(Json(session_links(timer.finish(view), &id)))
}

#[derive(Debug, Deserialize)]
pub struct SelectUserRequest {
    pub service: ServiceType,
    /// Position within the service's user partition.
    pub index: usize,
}

/// PUT /api/v1/sessions/{id}/user - Select the current user profile.
pub async fn select_user(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<SelectUserRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;

    let mut session = handle.lock().await;
    session.select_user(&state.directory, body.service, body.index)?;
    tracing::debug!(session_id = %id, service = %body.service, index = body.index, "User selected");
    let view = SessionView::from(&*session);

    Ok(Json(session_links(timer.finish(view), &id)))
}

/// GET /api/v1/sessions/{id}/turns - The conversation log in order.
pub async fn get_turns(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ConversationTurn>>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;
    let turns = handle.lock().await.conversation.turns().to_vec();

    Ok(Json(
        timer
            .finish(turns)
            .with_link("self", &format!("/api/v1/sessions/{id}/turns")),
    ))
}
