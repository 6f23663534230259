//! Integration tests for session and single-use token handling.

use chrono::{Duration, Utc};
use http::StatusCode;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use storefront_auth::token::Claims;
use storefront_database::AccountStore;
use storefront_entity::account::Role;

use crate::helpers::{JWT_SECRET, PASSWORD, TestApp};

async fn register(app: &TestApp) -> (Uuid, String) {
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "shopper@example.com",
                "name": "Shopper",
                "password": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let id = response.body["data"]["account"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    let token = response.body["data"]["verification_token"]
        .as_str()
        .unwrap()
        .to_string();
    (id, token)
}

#[tokio::test]
async fn test_verification_token_single_use() {
    let app = TestApp::new();
    let (_, token) = register(&app).await;

    let first = app
        .request(
            "POST",
            "/api/auth/verify-email",
            Some(serde_json::json!({ "token": token })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["email_verified"], true);

    // The same plaintext a second time is indistinguishable from a
    // token that never existed.
    let second = app
        .request(
            "POST",
            "/api/auth/verify-email",
            Some(serde_json::json!({ "token": token })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.error_code(), "TOKEN_INVALID");
}

#[tokio::test]
async fn test_expired_verification_token_rejected() {
    let app = TestApp::new();
    let (id, token) = register(&app).await;

    let mut stored = app.store.get(id).await.unwrap();
    stored.verification_token_expires_at = Some(Utc::now() - Duration::minutes(1));
    app.store.overwrite(stored).await;

    let response = app
        .request(
            "POST",
            "/api/auth/verify-email",
            Some(serde_json::json!({ "token": token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "TOKEN_INVALID");
}

#[tokio::test]
async fn test_reset_token_single_use() {
    let app = TestApp::new();
    app.create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    let requested = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(serde_json::json!({ "email": "shopper@example.com" })),
            None,
        )
        .await;
    assert_eq!(requested.status, StatusCode::OK);
    let token = requested.body["data"]["reset_token"]
        .as_str()
        .unwrap()
        .to_string();

    let first = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(serde_json::json!({
                "token": token,
                "password": "Orange-Quartz-9-Lantern?",
            })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK, "{:?}", first.body);

    let second = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(serde_json::json!({
                "token": token,
                "password": "Third-Pass-3-Anchor!",
            })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.error_code(), "TOKEN_INVALID");
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(serde_json::json!({ "email": "nobody@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tampered_session_token_rejected() {
    let app = TestApp::new();
    app.create_account("shopper@example.com", PASSWORD, Role::User)
        .await;
    let token = app.login("shopper@example.com", PASSWORD).await;

    // Flip one character of the signature segment.
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = app
        .request("GET", "/api/auth/me", None, Some(&tampered))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "TOKEN_INVALID");
}

#[tokio::test]
async fn test_expired_session_token_rejected() {
    let app = TestApp::new();
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    // Forge a token signed with the right key but already expired
    // past the verifier's leeway.
    let now = Utc::now();
    let claims = Claims {
        sub: id,
        role: Role::User,
        iat: (now - Duration::hours(2)).timestamp(),
        exp: (now - Duration::hours(1)).timestamp(),
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = app
        .request("GET", "/api/auth/me", None, Some(&expired))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_valid_token_for_deleted_account_rejected() {
    let app = TestApp::new();
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;
    let token = app.login("shopper@example.com", PASSWORD).await;

    app.store.delete(id).await.unwrap();

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_for_deactivated_account_rejected() {
    let app = TestApp::new();
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;
    let token = app.login("shopper@example.com", PASSWORD).await;

    // Deactivation beats the token's remaining lifetime.
    app.store.update_active(id, false).await.unwrap();

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "ACCOUNT_DEACTIVATED");
}
