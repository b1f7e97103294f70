//! Transaction log handlers.
//!
//! Endpoints:
//! - GET /api/v1/sessions/{id}/transactions         - Records in append order
//! - GET /api/v1/sessions/{id}/transactions/export  - CSV download (UTF-8 BOM)

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use absher_core::transaction::export_filename;
use absher_types::transaction::TransactionRecord;

use crate::http::error::AppError;
use crate::http::handlers::find_session;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /api/v1/sessions/{id}/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<TransactionRecord>>>, AppError> {
    let timer = RequestTimer::start();
    let (id, handle) = find_session(&state, &session_id)?;
    let records = handle.lock().await.transactions.records().to_vec();

    Ok(Json(
        timer
            .finish(records)
            .with_link("self", &format!("/api/v1/sessions/{id}/transactions"))
            .with_link("export", &format!("/api/v1/sessions/{id}/transactions/export")),
    ))
}

/// GET /api/v1/sessions/{id}/transactions/export - CSV attachment.
pub async fn export_transactions(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    let (id, handle) = find_session(&state, &session_id)?;
    let (csv, count) = {
        let session = handle.lock().await;
        (session.transactions.export_csv(), session.transactions.len())
    };
    let filename = export_filename(chrono::Utc::now());
    tracing::info!(session_id = %id, count, %filename, "Transactions exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
