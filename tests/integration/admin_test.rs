//! Integration tests for administrative account management.

use http::StatusCode;

use storefront_entity::account::Role;

use crate::helpers::{PASSWORD, TestApp};

async fn admin_token(app: &TestApp) -> String {
    app.create_account("admin@example.com", PASSWORD, Role::Admin)
        .await;
    app.login("admin@example.com", PASSWORD).await
}

#[tokio::test]
async fn test_admin_routes_reject_non_admins() {
    let app = TestApp::new();
    app.create_account("shopper@example.com", PASSWORD, Role::User)
        .await;
    app.create_account("mod@example.com", PASSWORD, Role::Moderator)
        .await;

    let body = serde_json::json!({
        "email": "new@example.com",
        "name": "New",
        "password": PASSWORD,
        "role": "user",
    });

    for email in ["shopper@example.com", "mod@example.com"] {
        let token = app.login(email, PASSWORD).await;
        let response = app
            .request("POST", "/api/admin/accounts", Some(body.clone()), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{email}");
        assert_eq!(response.error_code(), "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_admin_creates_preverified_account() {
    let app = TestApp::new();
    let token = admin_token(&app).await;

    let response = app
        .request(
            "POST",
            "/api/admin/accounts",
            Some(serde_json::json!({
                "email": "Staff@Example.com",
                "name": "Staff",
                "password": PASSWORD,
                "role": "moderator",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["email"], "staff@example.com");
    assert_eq!(response.body["data"]["role"], "moderator");
    // Admin-created accounts skip the verification flow entirely.
    assert_eq!(response.body["data"]["email_verified"], true);
    assert!(app.mailer.sent().await.is_empty());

    // The created account can log in immediately.
    app.login("staff@example.com", PASSWORD).await;
}

#[tokio::test]
async fn test_admin_create_rejects_unknown_role() {
    let app = TestApp::new();
    let token = admin_token(&app).await;

    let response = app
        .request(
            "POST",
            "/api/admin/accounts",
            Some(serde_json::json!({
                "email": "new@example.com",
                "name": "New",
                "password": PASSWORD,
                "role": "superuser",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_changes_role() {
    let app = TestApp::new();
    let token = admin_token(&app).await;
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/accounts/{id}/role"),
            Some(serde_json::json!({ "role": "moderator" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "moderator");

    // The promotion is live on the next request, not the next login.
    let shopper_token = app.login("shopper@example.com", PASSWORD).await;
    let me = app
        .request("GET", "/api/auth/me", None, Some(&shopper_token))
        .await;
    assert_eq!(me.body["data"]["role"], "moderator");
}

#[tokio::test]
async fn test_admin_deactivates_account() {
    let app = TestApp::new();
    let token = admin_token(&app).await;
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;
    let shopper_token = app.login("shopper@example.com", PASSWORD).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/accounts/{id}/status"),
            Some(serde_json::json!({ "active": false })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_active"], false);

    // Both the live session and fresh logins are now refused.
    let me = app
        .request("GET", "/api/auth/me", None, Some(&shopper_token))
        .await;
    assert_eq!(me.status, StatusCode::FORBIDDEN);
    assert_eq!(me.error_code(), "ACCOUNT_DEACTIVATED");

    let login = app
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
    assert_eq!(login.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_deletes_account() {
    let app = TestApp::new();
    let token = admin_token(&app).await;
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/accounts/{id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    assert!(app.store.get(id).await.is_none());

    let missing = app
        .request(
            "DELETE",
            &format!("/api/admin/accounts/{id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_reads_any_account() {
    let app = TestApp::new();
    let token = admin_token(&app).await;
    let id = app
        .create_account("shopper@example.com", PASSWORD, Role::User)
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/admin/accounts/{id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "shopper@example.com");
}
