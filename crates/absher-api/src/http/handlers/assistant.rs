//! Free-form assistant backed by hosted inference.
//!
//! Endpoints:
//! - POST /api/v1/sessions/{id}/assistant
//!
//! Inference failures are not HTTP errors: the error text becomes the
//! reply and is recorded in the conversation like any other answer.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use absher_core::llm::gateway::reply_text;

use crate::http::error::AppError;
use crate::http::handlers::{find_session, require_text};
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AssistantReply {
    pub reply: String,
    /// False when the reply is an error message.
    pub ok: bool,
}

/// POST /api/v1/sessions/{id}/assistant - Ask the hosted model.
pub async fn ask_assistant(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<AssistantRequest>,
) -> Result<Json<ApiResponse<AssistantReply>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;
    let message = require_text("message", &body.message)?;

    // The session lock is not held across the inference call.
    let cancel = state.shutdown.child_token();
    let result = state.gateway.ask(message, &cancel).await;
    let ok = result.is_ok();
    if let Err(e) = &result {
        tracing::warn!(session_id = %id, error = %e, "Assistant call failed");
    }
    let reply = reply_text(result);

    handle
        .lock()
        .await
        .conversation
        .record_exchange(message, &reply);

    Ok(Json(
        timer
            .finish(AssistantReply { reply, ok })
            .with_link("turns", &format!("/api/v1/sessions/{id}/turns")),
    ))
}
