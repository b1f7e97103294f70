//! Response envelope shared by every `/api/v1` endpoint.
//!
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 },
//!   "errors": [{ "code": "SESSION_NOT_FOUND", "message": "..." }],
//!   "_links": { "self": "/api/v1/sessions/..." }
//! }
//! ```
//!
//! `data` is omitted on errors, `errors` on success.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub meta: ApiMeta,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,

    /// Follow-up endpoints for the client, keyed by relation name.
    #[serde(rename = "_links", skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize)]
pub struct ApiMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub response_time_ms: u64,
}

impl ApiMeta {
    fn new(request_id: String, response_time_ms: u64) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
            response_time_ms,
        }
    }
}

/// Machine-readable code plus the human message shown to the visitor.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Started at the top of a handler; `finish` stamps the envelope.
pub struct RequestTimer {
    request_id: Uuid,
    start: Instant,
}

impl RequestTimer {
    pub fn start() -> Self {
        Self {
            request_id: Uuid::now_v7(),
            start: Instant::now(),
        }
    }

    pub fn finish<T: Serialize>(self, data: T) -> ApiResponse<T> {
        let elapsed = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        ApiResponse::success(data, self.request_id.to_string(), elapsed)
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta::new(request_id, response_time_ms),
            errors: Vec::new(),
            links: BTreeMap::new(),
        }
    }

    pub fn with_link(mut self, rel: &'static str, href: &str) -> Self {
        self.links.insert(rel, href.to_string());
        self
    }
}

impl ApiResponse<()> {
    pub fn error(code: &'static str, message: &str, request_id: String) -> Self {
        Self {
            data: None,
            meta: ApiMeta::new(request_id, 0),
            errors: vec![ApiErrorDetail {
                code,
                message: message.to_string(),
            }],
            links: BTreeMap::new(),
        }
    }
}
