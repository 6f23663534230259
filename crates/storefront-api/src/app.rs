//! Application builder — wires services + router + middleware into an
//! Axum app and runs it.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use storefront_auth::lockout::LockoutPolicy;
use storefront_auth::password::{PasswordHasher, PasswordValidator};
use storefront_auth::token::{SessionIssuer, SessionVerifier};
use storefront_core::config::{AppConfig, CorsConfig};
use storefront_core::{AppError, AppResult};
use storefront_database::AccountStore;
use storefront_mailer::MailSender;
use storefront_service::{AccountSecurityService, AdminAccountService, ProfileService};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared application state from configuration and the
/// already-constructed infrastructure providers.
pub fn build_state(
    config: AppConfig,
    store: Arc<dyn AccountStore>,
    mailer: Arc<dyn MailSender>,
) -> AppState {
    let hasher = Arc::new(PasswordHasher::new());
    let validator = Arc::new(PasswordValidator::new(&config.auth));
    let issuer = Arc::new(SessionIssuer::new(&config.auth));
    let verifier = Arc::new(SessionVerifier::new(&config.auth));
    let lockout = LockoutPolicy::new(&config.auth);

    let security_service = Arc::new(AccountSecurityService::new(
        Arc::clone(&store),
        Arc::clone(&mailer),
        Arc::clone(&hasher),
        Arc::clone(&validator),
        Arc::clone(&issuer),
        lockout,
        config.auth.clone(),
        config.email.clone(),
    ));
    let profile_service = Arc::new(ProfileService::new(Arc::clone(&store)));
    let admin_service = Arc::new(AdminAccountService::new(
        Arc::clone(&store),
        Arc::clone(&hasher),
        Arc::clone(&validator),
    ));

    AppState {
        config: Arc::new(config),
        store,
        verifier,
        security_service,
        profile_service,
        admin_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Runs the Storefront server until shutdown is requested.
pub async fn run_server(
    config: AppConfig,
    store: Arc<dyn AccountStore>,
    mailer: Arc<dyn MailSender>,
) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, store, mailer);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Storefront server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Storefront server stopped");
    Ok(())
}

/// Builds a CORS tower layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if config.allowed_origins.contains(&"*".to_string()) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    if config.allowed_headers.contains(&"*".to_string()) {
        layer = layer.allow_headers(Any);
    }

    layer.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
