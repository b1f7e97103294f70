//! GET /api/v1/comparison - traditional vs assisted workflow metrics.

use axum::Json;

use absher_core::comparison::{Comparison, comparison};

use crate::http::response::{ApiResponse, RequestTimer};

pub async fn get_comparison() -> Json<ApiResponse<Comparison>> {
    let timer = RequestTimer::start();
    Json(timer.finish(comparison()).with_link("self", "/api/v1/comparison"))
}
