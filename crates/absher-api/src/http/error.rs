//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use absher_types::error::{AutoFillError, SessionError, WorkflowError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Name-change workflow errors.
    Workflow(WorkflowError),
    /// Auto-fill and application errors.
    AutoFill(AutoFillError),
    /// Session registry errors.
    Session(SessionError),
    /// Unknown resource.
    NotFound(String),
    /// Validation error.
    Validation(String),
}

impl From<WorkflowError> for AppError {
    fn from(e: WorkflowError) -> Self {
        AppError::Workflow(e)
    }
}

impl From<AutoFillError> for AppError {
    fn from(e: AutoFillError) -> Self {
        AppError::AutoFill(e)
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Workflow(WorkflowError::OutOfOrder { .. }) => {
                (StatusCode::CONFLICT, "WORKFLOW_OUT_OF_ORDER")
            }
            AppError::Workflow(WorkflowError::UserNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND")
            }
            AppError::Workflow(WorkflowError::InvalidOtp) => (StatusCode::BAD_REQUEST, "INVALID_OTP"),
            AppError::Workflow(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::AutoFill(AutoFillError::NoUser) => (StatusCode::CONFLICT, "NO_USER_PROFILE"),
            AppError::AutoFill(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Session(SessionError::NotFound) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND")
            }
            AppError::Session(SessionError::UserIndexOutOfRange { .. }) => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Workflow(e) => e.to_string(),
            AppError::AutoFill(e) => e.to_string(),
            AppError::Session(e) => e.to_string(),
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message();

        tracing::debug!(status = status.as_u16(), code, "{message}");

        let body = ApiResponse::error(code, &message, Uuid::now_v7().to_string());
        let body = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"errors":[{"code":"SERIALIZATION_ERROR","message":"Failed to serialize response"}]}"#
                .to_string()
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
