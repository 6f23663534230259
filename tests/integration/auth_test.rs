//! Integration tests for registration, login and session introspection.

use http::StatusCode;

use storefront_entity::account::Role;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "Shopper@Example.com",
                "name": "Shopper",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let account = &response.body["data"]["account"];
    // Email is stored lowercase regardless of input casing.
    assert_eq!(account["email"], "shopper@example.com");
    assert_eq!(account["role"], "user");
    assert_eq!(account["email_verified"], false);
    // Debug channel is on in tests, so the token plaintext is echoed.
    assert!(response.body["data"]["verification_token"].is_string());
    // Secret-bearing columns never serialize.
    assert!(account.get("password_hash").is_none());

    // The verification email went to the outbox.
    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "shopper@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    let body = serde_json::json!({
        "email": "shopper@example.com",
        "name": "Shopper",
        "password": PASSWORD,
    });

    let first = app
        .request("POST", "/api/auth/register", Some(body.clone()), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/api/auth/register", Some(body), None)
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.error_code(), "DUPLICATE_IDENTITY");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "shopper@example.com",
                "name": "Shopper",
                "password": "Password1!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "not-an-email",
                "name": "Shopper",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    // Field-level details come from the request validator.
    assert!(response.body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "shopper@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.body["data"]["token"].is_string());
    assert!(response.body["data"]["expires_at"].is_string());
    assert!(response.body["data"]["account"]["last_login_at"].is_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "shopper@example.com",
                "password": "Wrong-Pass-1!",
            })),
            None,
        )
        .await;

    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    // Identical bodies, so a caller cannot enumerate accounts.
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_me_requires_session() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_me_with_session() {
    let app = TestApp::new();
    app.create_account("shopper@example.com", PASSWORD, Role::User)
        .await;
    let token = app.login("shopper@example.com", PASSWORD).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "shopper@example.com");
}

#[tokio::test]
async fn test_session_endpoint_never_rejects() {
    let app = TestApp::new();
    app.create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    // Anonymous: 200 with authenticated=false.
    let anon = app.request("GET", "/api/auth/session", None, None).await;
    assert_eq!(anon.status, StatusCode::OK);
    assert_eq!(anon.body["data"]["authenticated"], false);

    // Garbage token: still 200, still anonymous.
    let garbage = app
        .request("GET", "/api/auth/session", None, Some("not-a-token"))
        .await;
    assert_eq!(garbage.status, StatusCode::OK);
    assert_eq!(garbage.body["data"]["authenticated"], false);

    // Real session: reports the account.
    let token = app.login("shopper@example.com", PASSWORD).await;
    let authed = app
        .request("GET", "/api/auth/session", None, Some(&token))
        .await;
    assert_eq!(authed.status, StatusCode::OK);
    assert_eq!(authed.body["data"]["authenticated"], true);
    assert_eq!(authed.body["data"]["account"]["email"], "shopper@example.com");
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
