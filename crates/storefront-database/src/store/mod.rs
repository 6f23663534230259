//! The account store trait and its backends.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storefront_core::config::DatabaseConfig;
use storefront_core::{AppError, AppResult};
use storefront_entity::account::{Account, NewAccount, Role};
use uuid::Uuid;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;

/// Every query the account services need, behind one trait so the
/// backend can be swapped per environment.
///
/// Email lookups are case-insensitive; callers may pass addresses in
/// any casing. Mutating methods that return an [`Account`] hand back
/// the freshly updated row.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Looks up the account holding the given verification token digest.
    async fn find_by_verification_digest(&self, digest: &str) -> AppResult<Option<Account>>;

    /// Looks up the account holding the given reset token digest.
    async fn find_by_reset_digest(&self, digest: &str) -> AppResult<Option<Account>>;

    /// Inserts a new account. Fails with `DuplicateIdentity` when the
    /// email is already taken under case-insensitive comparison.
    async fn insert(&self, account: &NewAccount) -> AppResult<Account>;

    async fn update_name(&self, id: Uuid, name: &str) -> AppResult<Account>;

    /// Replaces the password hash and revokes any outstanding reset
    /// token, so a stale reset link cannot undo a deliberate change.
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Clears the failure counter and lock, stamps `last_login_at`.
    async fn record_login_success(&self, id: Uuid) -> AppResult<Account>;

    /// Stores the new failure count and, when the policy demands it,
    /// the lock expiry.
    async fn record_login_failure(
        &self,
        id: Uuid,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> AppResult<()>;

    /// Stores a fresh verification token digest, replacing any
    /// previous one.
    async fn set_verification_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Flags the email as verified and consumes the token digest.
    async fn mark_email_verified(&self, id: Uuid) -> AppResult<Account>;

    /// Stores a fresh reset token digest, replacing any previous one.
    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Applies a reset: new hash, reset token consumed, failure
    /// counter and lock cleared so the owner can sign in immediately.
    async fn complete_password_reset(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    async fn update_role(&self, id: Uuid, role: Role) -> AppResult<Account>;

    async fn update_active(&self, id: Uuid, active: bool) -> AppResult<Account>;

    /// Removes the account, returning whether a row existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Builds the store named by `config.provider`.
///
/// The `postgres` provider connects and runs migrations before
/// returning; `memory` backs the store with a process-local map and is
/// intended for tests and local development.
pub async fn build_store(config: &DatabaseConfig) -> AppResult<Arc<dyn AccountStore>> {
    match config.provider.as_str() {
        "postgres" => {
            let pool = DatabasePool::connect(config).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgAccountStore::new(pool.into_pool())))
        }
        "memory" => {
            tracing::info!("using in-memory account store");
            Ok(Arc::new(MemoryAccountStore::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown database provider '{other}', expected 'postgres' or 'memory'"
        ))),
    }
}
