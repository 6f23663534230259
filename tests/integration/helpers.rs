//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use storefront_api::app::{build_app, build_state};
use storefront_auth::password::PasswordHasher;
use storefront_core::config::AppConfig;
use storefront_database::AccountStore;
use storefront_database::store::MemoryAccountStore;
use storefront_entity::account::{NewAccount, Role};
use storefront_mailer::{MailSender, MemoryMailer};

/// Password that satisfies every policy rule, shared by fixtures.
pub const PASSWORD: &str = "Blue-Marmot-7-Kettle!";

/// Secret baked into the test config; tests that forge tokens sign
/// with it.
pub const JWT_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Memory store for direct fixture reads and writes
    pub store: Arc<MemoryAccountStore>,
    /// Outbox capturing every email the app tries to send
    pub mailer: Arc<MemoryMailer>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over the in-memory providers.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();
        config.auth.jwt_secret = JWT_SECRET.to_string();
        config.email.expose_debug_tokens = true;

        let store = Arc::new(MemoryAccountStore::new());
        let mailer = Arc::new(MemoryMailer::new());

        let state = build_state(
            config.clone(),
            Arc::clone(&store) as Arc<dyn AccountStore>,
            Arc::clone(&mailer) as Arc<dyn MailSender>,
        );
        let router = build_app(state);

        Self {
            router,
            store,
            mailer,
            config,
        }
    }

    /// Insert an account directly into the store and return its ID.
    pub async fn create_account(&self, email: &str, password: &str, role: Role) -> Uuid {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash(password).expect("Failed to hash password");

        let account = self
            .store
            .insert(&NewAccount {
                email: email.to_lowercase(),
                password_hash: hash,
                name: email.split('@').next().unwrap_or("account").to_string(),
                role,
                is_active: true,
                email_verified: true,
            })
            .await
            .expect("Failed to create test account");

        account.id
    }

    /// Login and return the session token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The machine-readable error code from an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or("")
    }
}
