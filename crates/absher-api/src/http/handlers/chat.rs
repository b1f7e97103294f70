//! Keyword assistant chat.
//!
//! Endpoints:
//! - POST /api/v1/sessions/{id}/chat - Route one message through the
//!   intent router and reply with a service overview or FAQ answer

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use absher_types::service::ServiceType;

use crate::http::error::AppError;
use crate::http::handlers::{find_session, require_text};
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// Service in focus after this message.
    pub current_service: Option<ServiceType>,
    /// Remaining workflow steps of the service in focus.
    pub next_steps: Vec<String>,
}

/// POST /api/v1/sessions/{id}/chat - Send one message to the keyword assistant.
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;
    let message = require_text("message", &body.message)?;

    let mut session = handle.lock().await;
    let reply = session.conversation.process_query(message);
    let current_service = session.conversation.current_service();
    let next_steps = current_service
        .map(|service| {
            state
                .catalog
                .next_steps(service, session.conversation.workflow_step())
                .to_vec()
        })
        .unwrap_or_default();

    tracing::info!(
        session_id = %id,
        service = ?current_service,
        "Chat message handled"
    );

    Ok(Json(
        timer
            .finish(ChatReply {
                reply,
                current_service,
                next_steps,
            })
            .with_link("turns", &format!("/api/v1/sessions/{id}/turns")),
    ))
}
