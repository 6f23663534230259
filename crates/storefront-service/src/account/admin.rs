//! Administrative account management — creation, role changes, status
//! changes, deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_auth::password::{PasswordHasher, PasswordValidator};
use storefront_auth::rbac;
use storefront_core::{AppError, AppResult};
use storefront_database::AccountStore;
use storefront_entity::account::{Account, NewAccount, Role};

use crate::context::RequestContext;

/// Handles administrative account operations. Every method checks the
/// caller's role itself, so no route wiring mistake can expose these.
#[derive(Clone)]
pub struct AdminAccountService {
    /// Account persistence.
    store: Arc<dyn AccountStore>,
    /// Password hashing for admin-created accounts.
    hasher: Arc<PasswordHasher>,
    /// Password policy for admin-created accounts.
    validator: Arc<PasswordValidator>,
}

/// Data for an admin-created account.
#[derive(Debug, Clone)]
pub struct CreateAccountData {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

impl AdminAccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            store,
            hasher,
            validator,
        }
    }

    /// Creates an account directly, with any role.
    ///
    /// Admin-created accounts skip the verification flow: they come
    /// out active with the email already marked verified, and no mail
    /// is sent.
    pub async fn create_account(
        &self,
        ctx: &RequestContext,
        data: CreateAccountData,
    ) -> AppResult<Account> {
        rbac::require_admin(ctx.role)?;

        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }

        self.validator.validate(&data.password)?;
        let password_hash = self.hasher.hash(&data.password)?;

        let account = self
            .store
            .insert(&NewAccount {
                email: data.email.trim().to_lowercase(),
                password_hash,
                name: name.to_string(),
                role: data.role,
                is_active: true,
                email_verified: true,
            })
            .await?;

        info!(
            admin_id = %ctx.account_id,
            new_account_id = %account.id,
            role = %account.role,
            "account created by admin"
        );

        Ok(account)
    }

    /// Reads any account by id.
    pub async fn get_account(&self, ctx: &RequestContext, account_id: Uuid) -> AppResult<Account> {
        rbac::require_admin(ctx.role)?;

        self.store
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Changes another account's role.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        new_role: Role,
    ) -> AppResult<Account> {
        rbac::require_admin(ctx.role)?;

        if account_id == ctx.account_id {
            return Err(AppError::forbidden("Cannot change your own role"));
        }

        let previous = self.get_account(ctx, account_id).await?;
        let account = self.store.update_role(account_id, new_role).await?;

        info!(
            admin_id = %ctx.account_id,
            target_id = %account_id,
            old_role = %previous.role,
            new_role = %account.role,
            "account role changed"
        );

        Ok(account)
    }

    /// Activates or deactivates another account.
    ///
    /// Deactivation takes effect on the target's next request even if
    /// they hold a live session token, because authentication re-loads
    /// the account every time.
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        active: bool,
    ) -> AppResult<Account> {
        rbac::require_admin(ctx.role)?;

        if account_id == ctx.account_id {
            return Err(AppError::forbidden("Cannot change your own status"));
        }

        let account = self.store.update_active(account_id, active).await?;

        info!(
            admin_id = %ctx.account_id,
            target_id = %account_id,
            active,
            "account status changed"
        );

        Ok(account)
    }

    /// Deletes another account outright.
    pub async fn delete_account(&self, ctx: &RequestContext, account_id: Uuid) -> AppResult<()> {
        rbac::require_admin(ctx.role)?;

        if account_id == ctx.account_id {
            return Err(AppError::forbidden("Cannot delete your own account"));
        }

        if !self.store.delete(account_id).await? {
            return Err(AppError::not_found("Account not found"));
        }

        info!(
            admin_id = %ctx.account_id,
            target_id = %account_id,
            "account deleted"
        );

        Ok(())
    }
}
