//! Integration tests for the failed-login lockout policy.

use chrono::{Duration, Utc};
use http::StatusCode;

use storefront_entity::account::Role;

use crate::helpers::{PASSWORD, TestApp};

async fn fail_login(app: &TestApp, email: &str) -> crate::helpers::TestResponse {
    app.request(
        "POST",
        "/api/auth/login",
        Some(serde_json::json!({
            "email": email,
            "password": "Wrong-Pass-1!",
        })),
        None,
    )
    .await
}

#[tokio::test]
async fn test_lockout_after_threshold_failures() {
    let app = TestApp::new();
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    let threshold = app.config.auth.max_failed_attempts;

    // Every attempt up to the threshold reads as bad credentials.
    for n in 1..=threshold {
        let response = fail_login(&app, "shopper@example.com").await;
        assert_eq!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "attempt {n} should be rejected as credentials"
        );
        assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
    }

    let stored = app.store.get(id).await.unwrap();
    assert_eq!(stored.failed_login_attempts, threshold);
    assert!(stored.locked_until.is_some());

    // Once locked, even the correct password is turned away.
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
    assert_eq!(response.status, StatusCode::LOCKED);
    assert_eq!(response.error_code(), "ACCOUNT_LOCKED");

    // The locked rejection happens before counting, so the counter
    // did not move.
    let stored = app.store.get(id).await.unwrap();
    assert_eq!(stored.failed_login_attempts, threshold);
}

#[tokio::test]
async fn test_lock_expires_lazily() {
    let app = TestApp::new();
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    for _ in 0..app.config.auth.max_failed_attempts {
        fail_login(&app, "shopper@example.com").await;
    }

    // Simulate the lock window passing; no unlock call is made.
    let mut stored = app.store.get(id).await.unwrap();
    stored.locked_until = Some(Utc::now() - Duration::minutes(1));
    app.store.overwrite(stored).await;

    let token = app.login("shopper@example.com", PASSWORD).await;
    assert!(!token.is_empty());

    // The successful login cleared the counter and the stale lock.
    let stored = app.store.get(id).await.unwrap();
    assert_eq!(stored.failed_login_attempts, 0);
    assert!(stored.locked_until.is_none());
}

#[tokio::test]
async fn test_locked_account_rejected_by_middleware() {
    let app = TestApp::new();
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;
    let token = app.login("shopper@example.com", PASSWORD).await;

    // Lock the account while the session token is still valid.
    let mut stored = app.store.get(id).await.unwrap();
    stored.locked_until = Some(Utc::now() + Duration::hours(1));
    app.store.overwrite(stored).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::LOCKED);
    assert_eq!(response.error_code(), "ACCOUNT_LOCKED");
}

#[tokio::test]
async fn test_reset_flow_clears_lockout() {
    let app = TestApp::new();
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    for _ in 0..app.config.auth.max_failed_attempts {
        fail_login(&app, "shopper@example.com").await;
    }
    assert!(app.store.get(id).await.unwrap().is_locked());

    // The owner of a locked account can still reset their password.
    let requested = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(serde_json::json!({ "email": "shopper@example.com" })),
            None,
        )
        .await;
    assert_eq!(requested.status, StatusCode::OK);
    let reset_token = requested.body["data"]["reset_token"]
        .as_str()
        .unwrap()
        .to_string();

    let reset = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(serde_json::json!({
                "token": reset_token,
                "password": "Orange-Quartz-9-Lantern?",
            })),
            None,
        )
        .await;
    assert_eq!(reset.status, StatusCode::OK, "{:?}", reset.body);

    // Reset cleared the lock and counter; the new password works.
    let stored = app.store.get(id).await.unwrap();
    assert_eq!(stored.failed_login_attempts, 0);
    assert!(stored.locked_until.is_none());

    app.login("shopper@example.com", "Orange-Quartz-9-Lantern?")
        .await;
}
