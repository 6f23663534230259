//! Application state shared across all handlers.

use std::sync::Arc;

use storefront_auth::token::SessionVerifier;
use storefront_core::config::AppConfig;
use storefront_database::AccountStore;
use storefront_service::{AccountSecurityService, AdminAccountService, ProfileService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Account store, used directly by the auth extractor
    pub store: Arc<dyn AccountStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token verifier
    pub verifier: Arc<SessionVerifier>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, password lifecycle
    pub security_service: Arc<AccountSecurityService>,
    /// Self-service profile operations
    pub profile_service: Arc<ProfileService>,
    /// Administrative account management
    pub admin_service: Arc<AdminAccountService>,
}
