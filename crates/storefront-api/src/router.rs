//! Route definitions for the Storefront HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Auth endpoints: registration, login, session, token flows
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/session", get(handlers::auth::session))
        .route("/auth/verify-email", post(handlers::auth::verify_email))
        .route(
            "/auth/forgot-password",
            post(handlers::auth::forgot_password),
        )
        .route("/auth/reset-password", post(handlers::auth::reset_password))
}

/// Account self-service endpoints
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(handlers::account::get_profile))
        .route("/account", put(handlers::account::update_profile))
        .route(
            "/account/password",
            put(handlers::account::change_password),
        )
        .route("/accounts/{id}", get(handlers::account::get_account))
}

/// Admin account management endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/accounts", post(handlers::admin::create_account))
        .route("/admin/accounts/{id}", get(handlers::admin::get_account))
        .route(
            "/admin/accounts/{id}/role",
            put(handlers::admin::change_role),
        )
        .route(
            "/admin/accounts/{id}/status",
            put(handlers::admin::change_status),
        )
        .route(
            "/admin/accounts/{id}",
            delete(handlers::admin::delete_account),
        )
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
