//! In-memory account store for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storefront_core::{AppError, AppResult};
use storefront_entity::account::{Account, NewAccount, Role};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AccountStore;

/// Keeps accounts in a process-local map behind an async lock.
///
/// Mirrors the PostgreSQL backend's semantics closely enough that the
/// service and integration tests run against it unchanged.
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    state: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches a raw copy of an account, bypassing the trait. Test
    /// fixtures use this to inspect columns the API never exposes.
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.state.read().await.get(&id).cloned()
    }

    /// Replaces an account wholesale. Test fixtures use this to
    /// backdate expiries and manufacture stale state.
    pub async fn overwrite(&self, account: Account) {
        self.state.write().await.insert(account.id, account);
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> AppResult<Account>
    where
        F: FnOnce(&mut Account),
    {
        let mut state = self.state.write().await;
        let account = state
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        apply(account);
        account.updated_at = Utc::now();
        Ok(account.clone())
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.state.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .values()
            .find(|account| account.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_verification_digest(&self, digest: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .values()
            .find(|account| account.verification_token_hash.as_deref() == Some(digest))
            .cloned())
    }

    async fn find_by_reset_digest(&self, digest: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .values()
            .find(|account| account.reset_token_hash.as_deref() == Some(digest))
            .cloned())
    }

    async fn insert(&self, account: &NewAccount) -> AppResult<Account> {
        let mut state = self.state.write().await;
        let taken = state
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&account.email));
        if taken {
            return Err(AppError::duplicate_identity(
                "Email address is already registered",
            ));
        }

        let now = Utc::now();
        let record = Account {
            id: Uuid::new_v4(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            name: account.name.clone(),
            role: account.role,
            is_active: account.is_active,
            email_verified: account.email_verified,
            failed_login_attempts: 0,
            locked_until: None,
            verification_token_hash: None,
            verification_token_expires_at: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        state.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_name(&self, id: Uuid, name: &str) -> AppResult<Account> {
        self.update(id, |account| account.name = name.to_string())
            .await
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        self.update(id, |account| {
            account.password_hash = password_hash.to_string();
            account.reset_token_hash = None;
            account.reset_token_expires_at = None;
        })
        .await?;
        Ok(())
    }

    async fn record_login_success(&self, id: Uuid) -> AppResult<Account> {
        self.update(id, |account| {
            account.failed_login_attempts = 0;
            account.locked_until = None;
            account.last_login_at = Some(Utc::now());
        })
        .await
    }

    async fn record_login_failure(
        &self,
        id: Uuid,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        self.update(id, |account| {
            account.failed_login_attempts = attempts;
            account.locked_until = locked_until;
        })
        .await?;
        Ok(())
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.update(id, |account| {
            account.verification_token_hash = Some(digest.to_string());
            account.verification_token_expires_at = Some(expires_at);
        })
        .await?;
        Ok(())
    }

    async fn mark_email_verified(&self, id: Uuid) -> AppResult<Account> {
        self.update(id, |account| {
            account.email_verified = true;
            account.verification_token_hash = None;
            account.verification_token_expires_at = None;
        })
        .await
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.update(id, |account| {
            account.reset_token_hash = Some(digest.to_string());
            account.reset_token_expires_at = Some(expires_at);
        })
        .await?;
        Ok(())
    }

    async fn complete_password_reset(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        self.update(id, |account| {
            account.password_hash = password_hash.to_string();
            account.reset_token_hash = None;
            account.reset_token_expires_at = None;
            account.failed_login_attempts = 0;
            account.locked_until = None;
        })
        .await?;
        Ok(())
    }

    async fn update_role(&self, id: Uuid, role: Role) -> AppResult<Account> {
        self.update(id, |account| account.role = role).await
    }

    async fn update_active(&self, id: Uuid, active: bool) -> AppResult<Account> {
        self.update(id, |account| account.is_active = active).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.write().await.remove(&id).is_some())
    }
}
