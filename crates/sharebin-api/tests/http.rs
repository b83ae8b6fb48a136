//! HTTP surface tests: the full router driven through `tower::oneshot`
//! against the in-memory stores and a tempdir storage provider.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use sharebin_api::app::{build_app, build_state};
use sharebin_core::config::{AppConfig, DatabaseConfig};
use sharebin_database::memory::{MemoryFileStore, MemoryUserStore};
use sharebin_storage::LocalStorageProvider;

const BOUNDARY: &str = "sharebin-test-boundary";

async fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(
        LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap(),
    );

    let config = AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: Default::default(),
        storage: Default::default(),
        logging: Default::default(),
    };

    let state = build_state(
        config,
        None,
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryFileStore::new()),
        storage,
    );
    (dir, build_app(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, value)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": name, "email": email, "password": "hunter2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

fn multipart_body(fields: &[(&str, &str)], file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

// Browsers typically append the file before the option fields; this
// variant mirrors that ordering.
fn multipart_body_file_first(fields: &[(&str, &str)], file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    app: &Router,
    token: &str,
    fields: &[(&str, &str)],
    content: &[u8],
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/files")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, "hello.txt", content)))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_register_sets_cookie_and_duplicate_is_rejected() {
    let (_dir, app) = test_app().await;

    let request = json_request(
        "POST",
        "/api/auth/register",
        json!({ "name": "Alice", "email": "alice@example.com", "password": "hunter2" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Alice2", "email": "ALICE@example.com", "password": "hunter2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (_dir, app) = test_app().await;
    register(&app, "Alice", "alice@example.com").await;

    let (status_a, body_a) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "nobody@example.com", "password": "hunter2" }),
        ),
    )
    .await;
    let (status_b, body_b) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "alice@example.com", "password": "wrong" }),
        ),
    )
    .await;

    assert_eq!(status_a, StatusCode::BAD_REQUEST);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a["error"], body_b["error"]);
    assert_eq!(body_a["message"], body_b["message"]);
}

#[tokio::test]
async fn test_current_user_via_bearer_and_cookie() {
    let (_dir, app) = test_app().await;
    let token = register(&app, "Alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/auth/user")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "alice@example.com");
    // Hashes never leave the server.
    assert!(body["data"].get("password_hash").is_none());

    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/api/auth/user")
            .header(header::COOKIE, format!("auth_token={token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/api/auth/user")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_requires_auth() {
    let (_dir, app) = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/files")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(&[], "hello.txt", b"hi")))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_download_delete_lifecycle() {
    let (_dir, app) = test_app().await;
    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;

    let (status, body) = upload(&app, &alice, &[("expiry", "1d")], b"hello").await;
    assert_eq!(status, StatusCode::OK, "upload failed: {body}");
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["size"], 5);
    assert!(!body["data"]["expires_at"].is_null());

    // Metadata is public and does not count.
    let (status, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/files/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["download_count"], 0);

    // Download streams the bytes with the right headers.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/files/{id}/download"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(disposition.contains("hello.txt"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"hello");

    let (_, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/files/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["download_count"], 1);

    // Stats reflect the lifecycle.
    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/files/stats")
            .header(header::AUTHORIZATION, format!("Bearer {alice}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_uploads"], 1);
    assert_eq!(body["data"]["total_downloads"], 1);
    assert_eq!(body["data"]["storage_used"], "5 B");

    // Only the owner may delete.
    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/files/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {bob}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/files/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {alice}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Request::builder()
            .uri(format!("/api/files/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_gated_download_sequence() {
    let (_dir, app) = test_app().await;
    let alice = register(&app, "Alice", "alice@example.com").await;

    let (status, body) = upload(&app, &alice, &[("password", "secret")], b"gated").await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["has_password"], true);

    let (status, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/files/{id}/download"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "PASSWORD_REQUIRED");

    let (status, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/files/{id}/download?password=wrong"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_PASSWORD");

    // POST keeps the password out of the URL.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/files/{id}/download"),
            json!({ "password": "secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"gated");
}

#[tokio::test]
async fn test_option_fields_after_the_file_part_still_apply() {
    let (_dir, app) = test_app().await;
    let alice = register(&app, "Alice", "alice@example.com").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/files")
        .header(header::AUTHORIZATION, format!("Bearer {alice}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body_file_first(
            &[("password", "secret"), ("expiry", "1d")],
            "hello.txt",
            b"gated",
        )))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["has_password"], true);
    assert!(!body["data"]["expires_at"].is_null());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // The trailing password really gates retrieval.
    let (status, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/files/{id}/download"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "PASSWORD_REQUIRED");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/files/{id}/download"),
            json!({ "password": "secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"gated");
}

#[tokio::test]
async fn test_unknown_file_is_not_found() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/files/0123456789abcdef0123456789abcdef")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health_reports_database_mode() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "disabled");
}
