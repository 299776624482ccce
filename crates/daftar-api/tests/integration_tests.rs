//! End-to-end tests against the full router, in-memory store, no
//! database. Admin auth runs through the static-token adapter.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use daftar_api::state::{AppConfig, AppState};
use daftar_idp::StaticTokenIdp;

const TEST_TOKEN: &str = "test-secret";

fn test_app() -> Router {
    let config = AppConfig {
        port: 0,
        auth_token: Some(TEST_TOKEN.to_string()),
    };
    let state = AppState::with_config(config, Some(Arc::new(StaticTokenIdp::new(TEST_TOKEN))), None);
    daftar_api::app(state)
}

fn app_without_auth() -> Router {
    daftar_api::app(AppState::new())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::empty()).expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn register(app: &Router, ic: &str, name: &str) -> axum::response::Response {
    app.clone()
        .oneshot(post_json(
            "/api/register",
            json!({ "icNumber": ic, "fullName": name }),
        ))
        .await
        .expect("response")
}

#[tokio::test]
async fn register_returns_201_with_created_user() {
    let app = test_app();
    let response = register(&app, "990101145678", "ahmad bin ali").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Berjaya didaftar"));
    assert_eq!(body["user"]["fullName"], json!("AHMAD BIN ALI"));
    assert!(body["user"]["id"].is_string());
    assert!(body["user"]["createdAt"].is_string());
    // The fingerprint stays server-side.
    assert!(body["user"].get("hashIc").is_none());
}

#[tokio::test]
async fn register_rejects_invalid_fields_with_details() {
    let app = test_app();
    let response = register(&app, "12345", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    let details = &body["error"]["details"];
    assert!(details["icNumber"].is_string());
    assert!(details["fullName"].is_string());
}

#[tokio::test]
async fn register_rejects_non_digit_ic() {
    let app = test_app();
    let response = register(&app, "99010114567a", "AHMAD").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_registration_returns_409_once_registered() {
    let app = test_app();
    let first = register(&app, "990101145678", "AHMAD BIN ALI").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same IC, different name — still a duplicate.
    let second = register(&app, "990101145678", "SOMEONE ELSE").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = body_json(second).await;
    assert_eq!(body["error"]["code"], json!("DUPLICATE"));
    assert_eq!(body["error"]["message"], json!("IC telah didaftar"));
}

#[tokio::test]
async fn register_rejects_malformed_json() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn extract_returns_both_fields() {
    let app = test_app();
    let text = "KAD PENGENALAN\nNAMA: SITI NURHALIZA\n990101-14-5678\n";
    let response = app
        .oneshot(post_json("/api/register/extract", json!({ "text": text })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["extracted"], json!(true));
    assert_eq!(body["icNumber"], json!("990101145678"));
    assert_eq!(body["fullName"], json!("SITI NURHALIZA"));
}

#[tokio::test]
async fn extract_is_all_or_nothing() {
    let app = test_app();
    // A usable name but no IC number anywhere.
    let response = app
        .oneshot(post_json(
            "/api/register/extract",
            json!({ "text": "NAMA: SITI NURHALIZA\nno numbers" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["extracted"], json!(false));
    assert!(body["reason"].is_string());
    assert!(body.get("icNumber").is_none());
    assert!(body.get("fullName").is_none());
}

#[tokio::test]
async fn extract_rejects_empty_text() {
    let app = test_app();
    let response = app
        .oneshot(post_json("/api/register/extract", json!({ "text": "   " })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_users_requires_token() {
    let app = test_app();
    let response = app
        .oneshot(get_with_token("/api/admin/users", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_users_rejects_wrong_token() {
    let app = test_app();
    let response = app
        .oneshot(get_with_token("/api/admin/users", Some("wrong-token")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_users_lists_registrations_newest_first_shape() {
    let app = test_app();
    register(&app, "111111111111", "AHMAD BIN ALI").await;
    register(&app, "222222222222", "SITI NURHALIZA").await;

    let response = app
        .oneshot(get_with_token("/api/admin/users", Some(TEST_TOKEN)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], json!(2));
    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 2);
    for user in users {
        assert_eq!(user["hashIc"].as_str().expect("hashIc").len(), 64);
        assert!(user["fullName"].is_string());
        assert!(user["createdAt"].is_string());
    }
}

#[tokio::test]
async fn admin_users_search_filters_by_substring() {
    let app = test_app();
    register(&app, "111111111111", "AHMAD BIN ALI").await;
    register(&app, "222222222222", "SITI NURHALIZA").await;

    let response = app
        .oneshot(get_with_token("/api/admin/users?search=ahmad", Some(TEST_TOKEN)))
        .await
        .expect("response");
    let body = body_json(response).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["users"][0]["fullName"], json!("AHMAD BIN ALI"));
}

#[tokio::test]
async fn admin_export_csv_has_header_and_rows() {
    let app = test_app();
    register(&app, "111111111111", "AHMAD BIN ALI").await;
    register(&app, "222222222222", "SITI NURHALIZA").await;

    let response = app
        .oneshot(get_with_token("/api/admin/export-csv", Some(TEST_TOKEN)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("ic-registrations.csv"));

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "\"ID\",\"Hash IC\",\"Full Name\",\"Created At\"");
    assert!(csv.contains("\"AHMAD BIN ALI\""));
}

#[tokio::test]
async fn admin_export_requires_token() {
    let app = test_app();
    let response = app
        .oneshot(get_with_token("/api/admin/export-csv", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_is_unavailable_with_static_token_auth() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/api/admin/login",
            json!({ "email": "admin@example.com", "password": "pw" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn login_rejects_missing_credentials() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/api/admin/login",
            json!({ "email": "", "password": "" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_invalidates_session_with_provider() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/logout")
                .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn admin_routes_are_open_when_auth_disabled() {
    let app = app_without_auth();
    let response = app
        .oneshot(get_with_token("/api/admin/users", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_probes_answer() {
    let app = test_app();

    let live = app
        .clone()
        .oneshot(get_with_token("/health/liveness", None))
        .await
        .expect("response");
    assert_eq!(live.status(), StatusCode::OK);

    let ready = app
        .oneshot(get_with_token("/health/readiness", None))
        .await
        .expect("response");
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app();
    let response = app
        .oneshot(get_with_token("/openapi.json", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/api/register"].is_object());
    assert!(body["paths"]["/api/admin/users"].is_object());
}
