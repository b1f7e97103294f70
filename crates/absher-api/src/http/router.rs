//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/services", get(handlers::service::list_services))
        .route("/services/{tag}", get(handlers::service::get_service))
        .route("/users", get(handlers::user::list_users))
        .route("/comparison", get(handlers::comparison::get_comparison))
        // Sessions
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/sessions/{id}/reset", post(handlers::session::reset_session))
        .route("/sessions/{id}/user", put(handlers::session::select_user))
        .route("/sessions/{id}/turns", get(handlers::session::get_turns))
        // Chat
        .route("/sessions/{id}/chat", post(handlers::chat::send_message))
        .route(
            "/sessions/{id}/assistant",
            post(handlers::assistant::ask_assistant),
        )
        // Forms
        .route(
            "/sessions/{id}/autofill",
            post(handlers::autofill::autofill_form),
        )
        .route(
            "/sessions/{id}/applications",
            post(handlers::autofill::submit),
        )
        // Name change
        .route(
            "/sessions/{id}/name-change",
            get(handlers::name_change::get_workflow),
        )
        .route(
            "/sessions/{id}/name-change/method",
            post(handlers::name_change::select_method),
        )
        .route(
            "/sessions/{id}/name-change/lookup",
            post(handlers::name_change::lookup),
        )
        .route(
            "/sessions/{id}/name-change/name",
            post(handlers::name_change::submit_name),
        )
        .route(
            "/sessions/{id}/name-change/confirm",
            post(handlers::name_change::confirm),
        )
        .route(
            "/sessions/{id}/name-change/verify",
            post(handlers::name_change::verify),
        )
        .route(
            "/sessions/{id}/name-change/restart",
            post(handlers::name_change::restart),
        )
        // Transactions
        .route(
            "/sessions/{id}/transactions",
            get(handlers::transaction::list_transactions),
        )
        .route(
            "/sessions/{id}/transactions/export",
            get(handlers::transaction::export_transactions),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::state::testing::test_state;

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn call_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = call(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = call_json(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_and_services() {
        let app = build_router(test_state(false));

        let (status, body) = call_json(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (_, body) = call_json(&app, Method::GET, "/api/v1/services", None).await;
        let ids: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            ids,
            ["v004_iqama_renewal", "v002_national_id", "v005_vehicle_registration"]
        );

        let (status, body) = call_json(&app, Method::GET, "/api/v1/services/vehicle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["data"]["eligibility_checks"].as_array().unwrap().is_empty());

        let (status, body) = call_json(&app, Method::GET, "/api/v1/services/passport", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn users_are_partitioned_by_service() {
        let app = build_router(test_state(false));

        let (_, body) = call_json(&app, Method::GET, "/api/v1/users?service=iqama", None).await;
        let users = body["data"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["index"], 0);
        assert_eq!(users[0]["label"], "Ravi Kumar (ID: 23456789...)");
        assert_eq!(users[0]["masked_id"], "Iqama ID: 234567****");

        let (_, body) = call_json(&app, Method::GET, "/api/v1/users", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let (status, _) = call_json(&app, Method::GET, "/api/v1/users?service=boat", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_routes_to_service_and_records_turns() {
        let app = build_router(test_state(false));
        let id = new_session(&app).await;

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/chat"),
            Some(json!({"message": "I want to renew my Iqama"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["current_service"], "iqama");
        assert!(body["data"]["reply"].as_str().unwrap().contains("Iqama"));
        assert!(!body["data"]["next_steps"].as_array().unwrap().is_empty());

        let (_, body) = call_json(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{id}/turns"),
            None,
        )
        .await;
        let turns = body["data"].as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["role"], "user");
        assert_eq!(turns[1]["role"], "assistant");

        let (status, _) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/chat"),
            Some(json!({"message": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sessions_are_isolated_and_deletable() {
        let app = build_router(test_state(false));
        let a = new_session(&app).await;
        let b = new_session(&app).await;

        call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{a}/chat"),
            Some(json!({"message": "vehicle registration"})),
        )
        .await;

        let (_, body) = call_json(&app, Method::GET, &format!("/api/v1/sessions/{b}"), None).await;
        assert_eq!(body["data"]["turn_count"], 0);
        assert!(body["data"]["current_service"].is_null());

        let (status, _) = call_json(&app, Method::DELETE, &format!("/api/v1/sessions/{a}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = call_json(&app, Method::GET, &format!("/api/v1/sessions/{a}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["code"], "SESSION_NOT_FOUND");

        let (status, _) = call_json(&app, Method::GET, "/api/v1/sessions/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn autofill_requires_a_profile() {
        let app = build_router(test_state(false));
        let id = new_session(&app).await;

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/autofill"),
            Some(json!({"service": "vehicle"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errors"][0]["message"], "No user profile loaded");

        let (status, _) = call_json(
            &app,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/user"),
            Some(json!({"service": "vehicle", "index": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/autofill"),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["service"], "vehicle");
        let fields = body["data"]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[5]["key"], "vehicle_plate");
        assert_eq!(fields[5]["label"], "Vehicle Plate");
        assert_eq!(fields[5]["value"], "ABC 123");

        let (status, _) = call_json(
            &app,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/user"),
            Some(json!({"service": "vehicle", "index": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn application_submission_logs_transaction() {
        let app = build_router(test_state(false));
        let id = new_session(&app).await;
        call_json(
            &app,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/user"),
            Some(json!({"service": "iqama", "index": 0})),
        )
        .await;

        let tomorrow = (chrono::Utc::now().date_naive() + chrono::Days::new(1)).to_string();
        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/applications"),
            Some(json!({"documents_uploaded": 2, "appointment_date": tomorrow})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["transaction"]["action"], "service_application");

        let (status, _) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/applications"),
            Some(json!({"documents_uploaded": 11, "appointment_date": tomorrow})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = call_json(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{id}/transactions"),
            None,
        )
        .await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn name_change_flow_and_csv_export() {
        let app = build_router(test_state(true));
        let id = new_session(&app).await;
        let base = format!("/api/v1/sessions/{id}/name-change");

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("{base}/name"),
            Some(json!({"name": "محمد علي"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errors"][0]["code"], "WORKFLOW_OUT_OF_ORDER");

        let (status, _) = call_json(
            &app,
            Method::POST,
            &format!("{base}/method"),
            Some(json!({"method": "national_id"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call_json(
            &app,
            Method::POST,
            &format!("{base}/lookup"),
            Some(json!({"id": "0000000000"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("{base}/lookup"),
            Some(json!({"id": "1122334455"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["profile"]["name_ar"], "أحمد");
        assert_eq!(body["data"]["step"], "enter_name");

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("{base}/name"),
            Some(json!({"name": "ab"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");

        call_json(
            &app,
            Method::POST,
            &format!("{base}/name"),
            Some(json!({"name": "محمد علي"})),
        )
        .await;
        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("{base}/confirm"),
            Some(json!({"confirmed": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["simulated_otp"].as_str().unwrap().len(), 6);

        // Demo mode: any six characters pass.
        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("{base}/verify"),
            Some(json!({"code": "xxxxxx"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["action"], "name_change");
        assert_eq!(body["data"]["details"], "أحمد -> محمد علي");

        let (status, bytes) = call(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{id}/transactions/export"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<_> = text.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("1122334455"));
        assert!(lines[1].contains("name_change"));
    }

    #[tokio::test]
    async fn restarted_name_change_appends_to_the_log() {
        let app = build_router(test_state(true));
        let id = new_session(&app).await;
        let base = format!("/api/v1/sessions/{id}/name-change");

        for new_name in ["محمد علي", "خالد سالم"] {
            let (status, body) = call_json(&app, Method::POST, &format!("{base}/restart"), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["step"], "select_method");

            for (step, body) in [
                ("method", json!({"method": "national_id"})),
                ("lookup", json!({"id": "1122334455"})),
                ("name", json!({"name": new_name})),
                ("confirm", json!({"confirmed": true})),
                ("verify", json!({"code": "xxxxxx"})),
            ] {
                let (status, _) = call_json(&app, Method::POST, &format!("{base}/{step}"), Some(body)).await;
                assert_eq!(status, StatusCode::OK, "step {step}");
            }
        }

        // Completed workflows reject further steps until restarted.
        let (status, _) = call_json(
            &app,
            Method::POST,
            &format!("{base}/method"),
            Some(json!({"method": "national_id"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, bytes) = call(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{id}/transactions/export"),
            None,
        )
        .await;
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let rows: Vec<_> = text.split("\r\n").filter(|l| !l.is_empty()).skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("أحمد -> محمد علي"));
        assert!(rows[1].ends_with("أحمد -> خالد سالم"));
    }

    #[tokio::test]
    async fn strict_mode_rejects_arbitrary_codes() {
        let app = build_router(test_state(false));
        let id = new_session(&app).await;
        let base = format!("/api/v1/sessions/{id}/name-change");

        for (step, body) in [
            ("method", json!({"method": "residency_id"})),
            ("lookup", json!({"id": "R-100"})),
            ("name", json!({"name": "Ravi Sharma"})),
        ] {
            let (status, _) = call_json(&app, Method::POST, &format!("{base}/{step}"), Some(body)).await;
            assert_eq!(status, StatusCode::OK, "step {step}");
        }
        let (_, body) = call_json(
            &app,
            Method::POST,
            &format!("{base}/confirm"),
            Some(json!({"confirmed": true})),
        )
        .await;
        let code = body["data"]["simulated_otp"].as_str().unwrap().to_string();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("{base}/verify"),
            Some(json!({"code": wrong})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "INVALID_OTP");

        let (status, _) = call_json(
            &app,
            Method::POST,
            &format!("{base}/verify"),
            Some(json!({"code": code})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn assistant_failure_becomes_reply_text() {
        let app = build_router(test_state(false));
        let id = new_session(&app).await;

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/assistant"),
            Some(json!({"message": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["ok"], false);
        assert!(body["data"]["reply"].as_str().unwrap().starts_with("Error: "));

        let (_, body) = call_json(&app, Method::GET, &format!("/api/v1/sessions/{id}/turns"), None).await;
        let turns = body["data"].as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["message"], "hello");
        assert!(turns[1]["message"].as_str().unwrap().starts_with("Error: "));
    }

    #[tokio::test]
    async fn comparison_table() {
        let app = build_router(test_state(false));
        let (status, body) = call_json(&app, Method::GET, "/api/v1/comparison", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["metrics"].as_array().unwrap().len(), 5);
    }
}
