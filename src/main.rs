//! Storefront Server — e-commerce backend.
//!
//! Main entry point that wires configuration, persistence, mail and the
//! HTTP layer together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use storefront_core::AppError;
use storefront_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Storefront v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Account store (connects + migrates for postgres) ──
    tracing::info!(
        "Initializing account store (provider: {})...",
        config.database.provider
    );
    let store = storefront_database::build_store(&config.database).await?;
    tracing::info!("Account store ready");

    // ── Step 2: Outbound mail transport ──────────────────────────
    let mailer = storefront_mailer::build_mailer(&config.email)?;

    // ── Step 3: HTTP server ──────────────────────────────────────
    storefront_api::run_server(config, store, mailer).await
}
