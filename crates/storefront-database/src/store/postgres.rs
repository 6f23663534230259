//! PostgreSQL-backed account store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use storefront_core::{AppError, AppResult};
use storefront_entity::account::{Account, NewAccount, Role};
use uuid::Uuid;

use super::AccountStore;

/// Store implementation that runs each operation as a single SQL
/// statement against the shared connection pool.
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps an insert failure onto `DuplicateIdentity` when the unique
/// email index rejected the row, and `Database` otherwise.
fn map_insert_error(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.constraint() == Some("accounts_email_key") {
            return AppError::duplicate_identity("Email address is already registered");
        }
    }
    AppError::database("Failed to insert account").with_source(err)
}

fn query_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| AppError::database(context).with_source(err)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("Failed to load account by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("Failed to load account by email"))
    }

    async fn find_by_verification_digest(&self, digest: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE verification_token_hash = $1")
            .bind(digest)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("Failed to load account by verification token"))
    }

    async fn find_by_reset_digest(&self, digest: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE reset_token_hash = $1")
            .bind(digest)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("Failed to load account by reset token"))
    }

    async fn insert(&self, account: &NewAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, name, password_hash, role, is_active, email_verified)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&account.email)
        .bind(&account.name)
        .bind(&account.password_hash)
        .bind(account.role)
        .bind(account.is_active)
        .bind(account.email_verified)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn update_name(&self, id: Uuid, name: &str) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("Failed to update account name"))?
        .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2,
                reset_token_hash = NULL,
                reset_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(query_error("Failed to update password"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Account not found"));
        }
        Ok(())
    }

    async fn record_login_success(&self, id: Uuid) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET failed_login_attempts = 0,
                locked_until = NULL,
                last_login_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("Failed to record login"))?
        .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn record_login_failure(
        &self,
        id: Uuid,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET failed_login_attempts = $2,
                locked_until = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(attempts)
        .bind(locked_until)
        .execute(&self.pool)
        .await
        .map_err(query_error("Failed to record login failure"))?;
        Ok(())
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET verification_token_hash = $2,
                verification_token_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(digest)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(query_error("Failed to store verification token"))?;
        Ok(())
    }

    async fn mark_email_verified(&self, id: Uuid) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET email_verified = TRUE,
                verification_token_hash = NULL,
                verification_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("Failed to mark email verified"))?
        .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET reset_token_hash = $2,
                reset_token_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(digest)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(query_error("Failed to store reset token"))?;
        Ok(())
    }

    async fn complete_password_reset(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2,
                reset_token_hash = NULL,
                reset_token_expires_at = NULL,
                failed_login_attempts = 0,
                locked_until = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(query_error("Failed to complete password reset"))?;
        Ok(())
    }

    async fn update_role(&self, id: Uuid, role: Role) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("Failed to update account role"))?
        .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn update_active(&self, id: Uuid, active: bool) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("Failed to update account status"))?
        .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_error("Failed to delete account"))?;
        Ok(result.rows_affected() > 0)
    }
}
