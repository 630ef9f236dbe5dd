//! Router-level tests: real services over an in-memory database, requests
//! driven through `tower::ServiceExt::oneshot`.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{create_client, database, persistence, test_config};
use timesheet::api::{create_router, AppState};
use timesheet::commands::seed::seed;
use timesheet::config::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};
use timesheet::infra::Persistence;

struct TestApp {
    router: Router,
    uow: Arc<Persistence>,
}

async fn app() -> TestApp {
    let db = database().await;
    let uow = persistence(&db);
    let state = AppState::from_config(Arc::new(db), test_config());

    TestApp {
        router: create_router(state),
        uow,
    }
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

async fn register_and_login(router: &Router, email: &str) -> String {
    let (status, _, _) = send(
        router,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Jane Doe",
            "email": email,
            "password": "secret1",
            "confirm_password": "secret1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    login(router, email, "secret1").await
}

async fn login(router: &Router, email: &str, password: &str) -> String {
    let (status, _, body) = send(
        router,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json_body(&body)["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_and_root() {
    let app = app().await;

    let (status, _, body) = send(&app.router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "healthy");

    let (status, _, _) = send(&app.router, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_normalizes_email_and_rejects_duplicates() {
    let app = app().await;
    let payload = json!({
        "name": "  Jane Doe ",
        "email": "Jane@Example.com",
        "password": "secret1",
        "confirm_password": "secret1"
    });

    let (status, _, body) = send(
        &app.router,
        Method::POST,
        "/auth/register",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let body = json_body(&body);
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert_eq!(body["data"]["name"], "Jane Doe");
    assert!(body["data"].get("password_hash").is_none());

    let (status, _, body) =
        send(&app.router, Method::POST, "/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json_body(&body)["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_mismatched_confirmation() {
    let app = app().await;

    let (status, _, body) = send(
        &app.router,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "password": "secret1",
            "confirm_password": "secret2"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = app().await;
    register_and_login(&app.router, "jane@example.com").await;

    let (status, _, body) = send(
        &app.router,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "jane@example.com", "password": "wrong-one" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&body)["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = app().await;

    for uri in ["/users/me", "/dashboard", "/time-entries", "/exports/entries.csv"] {
        let (status, _, _) = send(&app.router, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let (status, _, _) = send(
        &app.router,
        Method::GET,
        "/users/me",
        Some("not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_save_entry_then_export_csv() {
    let app = app().await;
    let token = register_and_login(&app.router, "jane@example.com").await;
    let acme = create_client(&app.uow, "Acme").await;

    for (date, hours) in [("2025-03-10", 3.5), ("2025-03-11", 2.0)] {
        let (status, _, body) = send(
            &app.router,
            Method::POST,
            "/time-entries",
            Some(&token),
            Some(json!({ "date": date, "client_id": acme.id, "hours": hours })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["description"], "Work for Acme");
    }

    let (status, headers, body) = send(
        &app.router,
        Method::GET,
        "/exports/entries.csv",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("time_entries_"));

    let csv = String::from_utf8(body).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Date,Client,Project,Hours,Description,Created");
    assert!(lines[1].starts_with("2025-03-11,Acme,No project,2.00,"));
    assert!(lines[2].starts_with("2025-03-10,Acme,No project,3.50,"));

    let (status, _, body) = send(
        &app.router,
        Method::GET,
        "/exports/summary.csv",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let csv = String::from_utf8(body).unwrap();
    assert_eq!(csv, "Month,Client,Project,Total hours\n2025-03,Acme,No project,5.5\n");
}

#[tokio::test]
async fn test_blank_history_filters_are_ignored() {
    let app = app().await;
    let token = register_and_login(&app.router, "jane@example.com").await;
    let acme = create_client(&app.uow, "Acme").await;

    let (status, _, _) = send(
        &app.router,
        Method::POST,
        "/time-entries",
        Some(&token),
        Some(json!({ "date": "2025-03-10", "client_id": acme.id, "hours": 2.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(
        &app.router,
        Method::GET,
        "/reports?year=&client=&project=",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let summary = &json_body(&body)["summary"];
    assert_eq!(summary.as_array().unwrap().len(), 1);
    assert_eq!(summary[0]["month_key"], "2025-03");

    let (status, _, body) = send(
        &app.router,
        Method::GET,
        "/exports/entries.csv?date_from=&date_to=&client_id=",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap().lines().count(), 2);

    let (status, _, _) = send(
        &app.router,
        Method::GET,
        "/reports?year=2024",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(
        &app.router,
        Method::GET,
        "/exports/summary.csv?year=abc",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_hours_are_rejected_before_write() {
    let app = app().await;
    let token = register_and_login(&app.router, "jane@example.com").await;
    let acme = create_client(&app.uow, "Acme").await;

    for hours in [0.0, 24.5] {
        let (status, _, _) = send(
            &app.router,
            Method::POST,
            "/time-entries",
            Some(&token),
            Some(json!({ "date": "2025-03-10", "client_id": acme.id, "hours": hours })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, _, body) = send(&app.router, Method::GET, "/time-entries", Some(&token), None).await;
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn test_deleting_another_users_entry_is_not_found() {
    let app = app().await;
    let owner = register_and_login(&app.router, "jane@example.com").await;
    let intruder = register_and_login(&app.router, "mallory@example.com").await;
    let acme = create_client(&app.uow, "Acme").await;

    let (_, _, body) = send(
        &app.router,
        Method::POST,
        "/time-entries",
        Some(&owner),
        Some(json!({ "date": "2025-03-10", "client_id": acme.id, "hours": 1.5 })),
    )
    .await;
    let id = json_body(&body)["id"].as_str().unwrap().to_string();
    let uri = format!("/time-entries/{}", id);

    let (status, _, _) = send(&app.router, Method::DELETE, &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, body) = send(
        &app.router,
        Method::GET,
        "/time-entries/day?date=2025-03-10",
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(json_body(&body).as_array().unwrap().len(), 1);

    let (status, _, _) = send(&app.router, Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_calendar_rejects_invalid_month() {
    let app = app().await;
    let token = register_and_login(&app.router, "jane@example.com").await;

    let (status, _, _) = send(
        &app.router,
        Method::GET,
        "/calendar?year=2025&month=13",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(
        &app.router,
        Method::GET,
        "/calendar?year=2025&month=2",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["calendar"]["days_in_month"], 28);
    assert_eq!(body["calendar"]["weeks"][0], json!([0, 0, 0, 0, 0, 1, 2]));
}

#[tokio::test]
async fn test_admin_endpoints_are_gated() {
    let app = app().await;
    let user_token = register_and_login(&app.router, "jane@example.com").await;

    let (status, _, _) = send(
        &app.router,
        Method::GET,
        "/admin/overview",
        Some(&user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    seed(app.uow.as_ref(), true).await.unwrap();
    let admin_token = login(&app.router, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;

    let (status, _, body) = send(
        &app.router,
        Method::GET,
        "/admin/overview",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["users_count"], 2);
    assert_eq!(body["clients_count"], 3);
    assert_eq!(body["projects_count"], 5);

    let (status, _, body) = send(
        &app.router,
        Method::POST,
        "/admin/clients",
        Some(&admin_token),
        Some(json!({ "name": "Umbrella", "description": "Pharma" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let client_id = json_body(&body)["data"]["id"].as_str().unwrap().to_string();

    let (status, _, body) = send(
        &app.router,
        Method::PUT,
        &format!("/admin/clients/{}", client_id),
        Some(&admin_token),
        Some(json!({ "active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["active"], false);

    // Deactivated clients drop out of selection lists only
    let (_, _, body) = send(&app.router, Method::GET, "/clients", Some(&user_token), None).await;
    assert_eq!(json_body(&body).as_array().unwrap().len(), 3);
    let (_, _, body) = send(
        &app.router,
        Method::GET,
        "/admin/clients",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(json_body(&body).as_array().unwrap().len(), 4);
}
