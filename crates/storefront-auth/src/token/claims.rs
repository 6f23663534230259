//! Claims payload embedded in every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_entity::account::Role;
use uuid::Uuid;

/// Session token claims.
///
/// The role is a snapshot taken at issue time; authorization decisions
/// re-load the account so a demotion or deactivation takes effect
/// before the token expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Account role at issue time.
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// The account this session belongs to.
    pub fn account_id(&self) -> Uuid {
        self.sub
    }

    /// Expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
