//! Request context carrying the authenticated account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_entity::account::Role;
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the extraction layer after the session token has been
/// verified *and* the account re-loaded, so the role and flags here
/// reflect the store right now, not the token's issue-time snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account's ID.
    pub account_id: Uuid,
    /// The account's email address.
    pub email: String,
    /// Current role, freshly loaded.
    pub role: Role,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(account_id: Uuid, email: String, role: Role, email_verified: bool) -> Self {
        Self {
            account_id,
            email,
            role,
            email_verified,
            request_time: Utc::now(),
        }
    }

    /// Whether the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
