//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// A registered account in the Storefront system.
///
/// Carries the full security state for the identity: credential hash,
/// lockout counters, and the hashed single-use tokens for email
/// verification and password reset. Secret-bearing fields are never
/// serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address, stored lowercase. Unique across all accounts.
    pub email: String,
    /// Argon2id password hash (PHC string).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Customer display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Whether the account may authenticate at all.
    pub is_active: bool,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Number of consecutive failed login attempts.
    pub failed_login_attempts: i32,
    /// Account locked until this time, if a lockout is in effect.
    pub locked_until: Option<DateTime<Utc>>,
    /// SHA-256 digest of the pending email verification token.
    #[serde(skip_serializing)]
    pub verification_token_hash: Option<String>,
    /// Expiry of the pending email verification token.
    #[serde(skip_serializing)]
    pub verification_token_expires_at: Option<DateTime<Utc>>,
    /// SHA-256 digest of the pending password reset token.
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,
    /// Expiry of the pending password reset token.
    #[serde(skip_serializing)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Check if the account is currently locked.
    ///
    /// Lock expiry is evaluated lazily at read time: once `locked_until`
    /// passes, the account is usable again without any store write.
    pub fn is_locked(&self) -> bool {
        match self.locked_until {
            Some(locked_until) => Utc::now() < locked_until,
            None => false,
        }
    }

    /// Check if the account can authenticate right now.
    pub fn can_login(&self) -> bool {
        self.is_active && !self.is_locked()
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Email address (already normalized to lowercase).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Customer display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
    /// Whether the account starts active.
    pub is_active: bool,
    /// Whether the email starts verified (admin-created accounts).
    pub email_verified: bool,
}
