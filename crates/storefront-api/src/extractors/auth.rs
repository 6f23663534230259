//! `AuthAccount` extractor — pulls the bearer token from the
//! Authorization header, verifies it, re-loads the account and injects
//! the request context.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use storefront_core::{AppError, AppResult};
use storefront_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated account context available in handlers.
///
/// Extraction re-loads the account from the store on every request,
/// so deactivation and lockout take effect immediately even while a
/// session token is still cryptographically valid.
#[derive(Debug, Clone)]
pub struct AuthAccount(pub RequestContext);

impl std::ops::Deref for AuthAccount {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = authenticate(parts, state).await?;
        Ok(AuthAccount(ctx))
    }
}

/// Like [`AuthAccount`] but never rejects: any authentication failure
/// yields an anonymous request instead. Used by endpoints that report
/// session state rather than requiring one.
#[derive(Debug, Clone)]
pub struct MaybeAccount(pub Option<RequestContext>);

impl FromRequestParts<AppState> for MaybeAccount {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAccount(authenticate(parts, state).await.ok()))
    }
}

async fn authenticate(parts: &Parts, state: &AppState) -> AppResult<RequestContext> {
    // Extract the bearer token from the Authorization header
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))?;

    let claims = state.verifier.verify(token)?;

    // Re-resolve the account so revocations beat the token lifetime
    let account = state
        .store
        .find_by_id(claims.account_id())
        .await?
        .ok_or_else(|| AppError::unauthenticated("Account no longer exists"))?;

    if !account.is_active {
        return Err(AppError::account_deactivated("Account has been deactivated"));
    }

    if account.is_locked() {
        return Err(AppError::account_locked(
            "Account is temporarily locked, try again later",
        ));
    }

    Ok(RequestContext::new(
        account.id,
        account.email,
        account.role,
        account.email_verified,
    ))
}
