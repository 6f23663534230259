//! Self-service profile operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_auth::rbac;
use storefront_core::{AppError, AppResult};
use storefront_database::AccountStore;
use storefront_entity::account::Account;

use crate::context::RequestContext;

/// Handles account self-service: viewing and editing one's own record.
#[derive(Clone)]
pub struct ProfileService {
    /// Account persistence.
    store: Arc<dyn AccountStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// The caller's own account record.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<Account> {
        self.load(ctx.account_id).await
    }

    /// Updates the caller's display name.
    pub async fn update_profile(&self, ctx: &RequestContext, name: &str) -> AppResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }

        let account = self.store.update_name(ctx.account_id, name).await?;

        info!(account_id = %ctx.account_id, "profile updated");
        Ok(account)
    }

    /// Reads an account by id — the owner and administrators only.
    pub async fn get_account(&self, ctx: &RequestContext, account_id: Uuid) -> AppResult<Account> {
        rbac::require_owner_or_admin(ctx.role, ctx.account_id, account_id)?;
        self.load(account_id).await
    }

    async fn load(&self, id: Uuid) -> AppResult<Account> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }
}
