//! Role and ownership checks.
//!
//! These run after authentication, against the role loaded fresh from
//! the store rather than the role snapshot inside the token.

use storefront_core::{AppError, AppResult};
use storefront_entity::account::Role;
use uuid::Uuid;

/// Passes when the caller's role is one of `allowed`.
pub fn require_role(role: Role, allowed: &[Role]) -> AppResult<()> {
    if allowed.contains(&role) {
        return Ok(());
    }
    Err(AppError::forbidden(
        "Insufficient privileges for this operation",
    ))
}

/// [`require_role`] for routes that resolve the caller optionally.
///
/// An anonymous caller was let through without credentials, so the
/// refusal here is `Forbidden` rather than `Unauthenticated`: the
/// request reached the gate, it just carries no role that satisfies it.
pub fn require_role_opt(role: Option<Role>, allowed: &[Role]) -> AppResult<()> {
    match role {
        Some(role) => require_role(role, allowed),
        None => Err(AppError::forbidden(
            "Insufficient privileges for this operation",
        )),
    }
}

/// Passes only for administrators.
pub fn require_admin(role: Role) -> AppResult<()> {
    require_role(role, &[Role::Admin])
}

/// Passes when the caller owns the resource or is an administrator.
pub fn require_owner_or_admin(role: Role, caller_id: Uuid, owner_id: Uuid) -> AppResult<()> {
    if role.is_admin() || caller_id == owner_id {
        return Ok(());
    }
    Err(AppError::forbidden(
        "You do not have access to this account",
    ))
}
