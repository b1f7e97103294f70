//! Service catalog HTTP handlers.
//!
//! Endpoints:
//! - GET /api/v1/services        - All services in declaration order
//! - GET /api/v1/services/{tag}  - One service with its eligibility checks

use axum::Json;
use axum::extract::{Path, State};

use absher_types::service::ServiceDefinition;

use crate::http::error::AppError;
use crate::http::handlers::parse_service;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /api/v1/services - List the catalog.
pub async fn list_services(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<ServiceDefinition>>> {
    let timer = RequestTimer::start();
    let services = state.catalog.all().to_vec();
    Json(timer.finish(services).with_link("self", "/api/v1/services"))
}

/// GET /api/v1/services/{tag} - Get one service definition.
pub async fn get_service(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<ApiResponse<ServiceDefinition>>, AppError> {
    let timer = RequestTimer::start();
    let service = parse_service(&tag)?;
    let definition = state.catalog.get(service).clone();

    Ok(Json(
        timer
            .finish(definition)
            .with_link("self", &format!("/api/v1/services/{service}"))
            .with_link("users", &format!("/api/v1/users?service={service}")),
    ))
}
