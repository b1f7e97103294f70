//! Synthetic user listing.
//!
//! Endpoints:
//! - GET /api/v1/users?service=&limit=&offset=

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use absher_types::service::ServiceType;
use absher_types::user::UserRecord;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Service tag; all users when absent.
    pub service: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}

/// One selectable user. `index` is the position within the user's service
/// partition, which is what `PUT /sessions/{id}/user` expects.
#[derive(Debug, Serialize)]
pub struct UserListing {
    pub service: Option<ServiceType>,
    pub index: Option<usize>,
    pub label: String,
    pub masked_id: Option<String>,
    pub record: UserRecord,
}

impl UserListing {
    fn new(record: &UserRecord, index: Option<usize>) -> Self {
        Self {
            service: record.service_type(),
            index,
            label: record.label(),
            masked_id: record.masked_id().map(|(kind, id)| format!("{kind}: {id}")),
            record: record.clone(),
        }
    }
}

/// GET /api/v1/users - List synthetic users, optionally for one service.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ApiResponse<Vec<UserListing>>>, AppError> {
    let timer = RequestTimer::start();

    let listings: Vec<UserListing> = match query.service.as_deref() {
        Some(tag) => {
            let service = tag.parse::<ServiceType>().map_err(AppError::Validation)?;
            state
                .directory
                .by_service(service)
                .into_iter()
                .enumerate()
                .skip(query.offset)
                .take(query.limit)
                .map(|(index, user)| UserListing::new(user, Some(index)))
                .collect()
        }
        None => {
            let mut positions: HashMap<ServiceType, usize> = HashMap::new();
            state
                .directory
                .all()
                .iter()
                .map(|user| {
                    let index = user.service_type().map(|service| {
                        let slot = positions.entry(service).or_default();
                        let index = *slot;
                        *slot += 1;
                        index
                    });
                    (user, index)
                })
                .skip(query.offset)
                .take(query.limit)
                .map(|(user, index)| UserListing::new(user, index))
                .collect()
        }
    };

    Ok(Json(timer.finish(listings).with_link("self", "/api/v1/users")))
}
