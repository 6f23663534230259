//! Session token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use storefront_core::config::AuthConfig;
use storefront_core::{AppError, AppResult};
use storefront_entity::account::Role;
use uuid::Uuid;

use super::claims::Claims;

/// Creates signed session tokens for authenticated accounts.
#[derive(Clone)]
pub struct SessionIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session TTL in minutes.
    session_ttl_minutes: i64,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .finish()
    }
}

/// A freshly signed session token and when it stops working.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            session_ttl_minutes: config.session_ttl_minutes as i64,
        }
    }

    /// Signs a session token for the account, valid from now until the
    /// configured TTL elapses.
    pub fn issue(&self, account_id: Uuid, role: Role) -> AppResult<IssuedSession> {
        let now = Utc::now();

        let claims = Claims {
            sub: account_id,
            role,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(self.session_ttl_minutes)).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))?;

        // Derived from the claims so the response matches the token exactly.
        Ok(IssuedSession {
            expires_at: claims.expires_at(),
            token,
        })
    }
}
