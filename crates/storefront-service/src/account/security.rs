//! Account security lifecycle — registration, login, password changes,
//! password resets and email verification.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use storefront_auth::lockout::LockoutPolicy;
use storefront_auth::password::{PasswordHasher, PasswordValidator};
use storefront_auth::single_use::SingleUseToken;
use storefront_auth::token::SessionIssuer;
use storefront_core::config::{AuthConfig, EmailConfig};
use storefront_core::{AppError, AppResult};
use storefront_database::AccountStore;
use storefront_entity::account::{Account, NewAccount, Role};
use storefront_mailer::{messages, MailSender};

use crate::context::RequestContext;

/// The one message every credential failure shares, so a response can
/// never reveal whether the email exists.
const LOGIN_REJECTED: &str = "Invalid email or password";

/// Handles the account security lifecycle.
#[derive(Clone)]
pub struct AccountSecurityService {
    /// Account persistence.
    store: Arc<dyn AccountStore>,
    /// Outbound mail for verification and reset links.
    mailer: Arc<dyn MailSender>,
    /// Password hashing.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Session token signing.
    issuer: Arc<SessionIssuer>,
    /// Failed-login lockout policy.
    lockout: LockoutPolicy,
    /// Single-use token TTLs.
    auth_config: AuthConfig,
    /// Link base URL for outbound mail.
    email_config: EmailConfig,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub account: Account,
    /// The verification token; its plaintext has been emailed.
    pub verification_token: SingleUseToken,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub account: Account,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful password reset request.
#[derive(Debug, Clone)]
pub struct ResetRequested {
    /// The reset token; its plaintext has been emailed.
    pub reset_token: SingleUseToken,
}

/// Canonical form for stored and compared email addresses.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AccountSecurityService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn AccountStore>,
        mailer: Arc<dyn MailSender>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        issuer: Arc<SessionIssuer>,
        lockout: LockoutPolicy,
        auth_config: AuthConfig,
        email_config: EmailConfig,
    ) -> Self {
        Self {
            store,
            mailer,
            hasher,
            validator,
            issuer,
            lockout,
            auth_config,
            email_config,
        }
    }

    /// Creates a new customer account and emails a verification link.
    ///
    /// Registration succeeds even when the email cannot be delivered;
    /// the token stays stored, and verification can be re-driven later.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> AppResult<RegistrationOutcome> {
        let email = normalize_email(email);
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }

        self.validator.validate(password)?;
        let password_hash = self.hasher.hash(password)?;

        let account = self
            .store
            .insert(&NewAccount {
                email,
                password_hash,
                name: name.to_string(),
                role: Role::User,
                is_active: true,
                email_verified: false,
            })
            .await?;

        let token = self.issue_verification_token(&account).await?;

        let mail = messages::verification_email(
            &account.name,
            &token.plaintext,
            &self.email_config.frontend_base_url,
        );
        if let Err(err) = self.mailer.send(&account.email, &mail.subject, &mail.body).await {
            warn!(
                account_id = %account.id,
                error = %err,
                "verification email failed, token stays active"
            );
        }

        info!(account_id = %account.id, "account registered");

        Ok(RegistrationOutcome {
            account,
            verification_token: token,
        })
    }

    /// Authenticates a login attempt and issues a session token.
    ///
    /// Checks run in a fixed order: existence, active flag, lock,
    /// password. A locked rejection does not touch the failure
    /// counter; a wrong password while unlocked increments it and may
    /// trigger a lock.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let email = normalize_email(email);

        let Some(account) = self.store.find_by_email(&email).await? else {
            return Err(AppError::invalid_credentials(LOGIN_REJECTED));
        };

        if !account.is_active {
            return Err(AppError::account_deactivated("Account has been deactivated"));
        }

        if account.is_locked() {
            return Err(AppError::account_locked(
                "Account is temporarily locked, try again later",
            ));
        }

        if !self.hasher.verify(password, &account.password_hash)? {
            let outcome = self
                .lockout
                .register_failure(account.failed_login_attempts, Utc::now());
            self.store
                .record_login_failure(account.id, outcome.attempts, outcome.locked_until)
                .await?;

            if outcome.locked_until.is_some() {
                warn!(
                    account_id = %account.id,
                    attempts = outcome.attempts,
                    "account locked after repeated login failures"
                );
            }

            return Err(AppError::invalid_credentials(LOGIN_REJECTED));
        }

        let account = self.store.record_login_success(account.id).await?;
        let session = self.issuer.issue(account.id, account.role)?;

        info!(account_id = %account.id, "login succeeded");

        Ok(LoginOutcome {
            account,
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    /// Changes the caller's own password after re-proving the current
    /// one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let account = self.load(ctx.account_id).await?;

        if !self
            .hasher
            .verify(current_password, &account.password_hash)?
        {
            return Err(AppError::invalid_credentials(
                "Current password is incorrect",
            ));
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash(new_password)?;
        self.store
            .update_password_hash(account.id, &new_hash)
            .await?;

        info!(account_id = %account.id, "password changed");
        Ok(())
    }

    /// Starts a password reset: stores a single-use token and emails
    /// its plaintext.
    ///
    /// A delivery failure is surfaced to the caller, but the token is
    /// not rolled back — the owner may still receive a delayed email,
    /// and the token dies on its own at expiry.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<ResetRequested> {
        let email = normalize_email(email);

        let Some(account) = self.store.find_by_email(&email).await? else {
            return Err(AppError::not_found("No account with that email address"));
        };

        if !account.is_active {
            return Err(AppError::account_deactivated("Account has been deactivated"));
        }

        let ttl = Duration::minutes(self.auth_config.reset_token_ttl_minutes as i64);
        let token = SingleUseToken::generate(ttl);
        self.store
            .set_reset_token(account.id, &token.digest, token.expires_at)
            .await?;

        let mail = messages::password_reset_email(
            &account.name,
            &token.plaintext,
            &self.email_config.frontend_base_url,
        );
        if let Err(err) = self.mailer.send(&account.email, &mail.subject, &mail.body).await {
            warn!(
                account_id = %account.id,
                error = %err,
                "reset email failed, token stays active until expiry"
            );
            return Err(err);
        }

        info!(account_id = %account.id, "password reset requested");

        Ok(ResetRequested { reset_token: token })
    }

    /// Completes a password reset with a token from the reset email.
    ///
    /// On success the token is consumed and any lockout is cleared, so
    /// the owner of a locked account can recover it immediately.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        let digest = SingleUseToken::digest_of(token);

        let Some(account) = self.store.find_by_reset_digest(&digest).await? else {
            return Err(AppError::token_invalid(
                "Reset token is invalid or has expired",
            ));
        };

        if !account.is_active {
            return Err(AppError::account_deactivated("Account has been deactivated"));
        }

        if !token_still_valid(account.reset_token_expires_at) {
            return Err(AppError::token_invalid(
                "Reset token is invalid or has expired",
            ));
        }

        self.validator.validate(new_password)?;
        let new_hash = self.hasher.hash(new_password)?;
        self.store
            .complete_password_reset(account.id, &new_hash)
            .await?;

        info!(account_id = %account.id, "password reset completed");
        Ok(())
    }

    /// Confirms an email address with a token from the verification
    /// email. Returns the refreshed account.
    pub async fn verify_email(&self, token: &str) -> AppResult<Account> {
        let digest = SingleUseToken::digest_of(token);

        let Some(account) = self.store.find_by_verification_digest(&digest).await? else {
            return Err(AppError::token_invalid(
                "Verification token is invalid or has expired",
            ));
        };

        if !token_still_valid(account.verification_token_expires_at) {
            return Err(AppError::token_invalid(
                "Verification token is invalid or has expired",
            ));
        }

        let account = self.store.mark_email_verified(account.id).await?;

        info!(account_id = %account.id, "email verified");
        Ok(account)
    }

    /// Generates and stores a fresh verification token for an account.
    async fn issue_verification_token(&self, account: &Account) -> AppResult<SingleUseToken> {
        let ttl = Duration::hours(self.auth_config.verification_token_ttl_hours as i64);
        let token = SingleUseToken::generate(ttl);
        self.store
            .set_verification_token(account.id, &token.digest, token.expires_at)
            .await?;
        Ok(token)
    }

    async fn load(&self, id: Uuid) -> AppResult<Account> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }
}

/// Single-use tokens die silently: an expired one is treated exactly
/// like one that never existed.
fn token_still_valid(expires_at: Option<DateTime<Utc>>) -> bool {
    matches!(expires_at, Some(at) if at > Utc::now())
}
