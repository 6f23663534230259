//! Auth handlers — registration, login, session introspection, email
//! verification and password resets.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    VerifyEmailRequest,
};
use crate::dto::response::{
    AccountResponse, ApiResponse, LoginResponse, MessageResponse, RegisterResponse,
    ResetRequestedResponse, SessionResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthAccount, MaybeAccount};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    req.validate()?;

    let outcome = state
        .security_service
        .register(&req.email, &req.name, &req.password)
        .await?;

    let verification_token = state
        .config
        .email
        .expose_debug_tokens
        .then(|| outcome.verification_token.plaintext.clone());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(RegisterResponse {
            account: outcome.account.into(),
            verification_token,
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate()?;

    let outcome = state
        .security_service
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: outcome.token,
        expires_at: outcome.expires_at,
        account: outcome.account.into(),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.profile_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// GET /api/auth/session
///
/// Never fails: reports whether the request carried a usable session.
pub async fn session(
    State(state): State<AppState>,
    maybe: MaybeAccount,
) -> Json<ApiResponse<SessionResponse>> {
    let account = match maybe.0 {
        Some(ctx) => state
            .profile_service
            .get_profile(&ctx)
            .await
            .ok()
            .map(AccountResponse::from),
        None => None,
    };

    Json(ApiResponse::ok(SessionResponse {
        authenticated: account.is_some(),
        account,
    }))
}

/// POST /api/auth/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    req.validate()?;

    let account = state.security_service.verify_email(&req.token).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<ResetRequestedResponse>>, ApiError> {
    req.validate()?;

    let requested = state
        .security_service
        .request_password_reset(&req.email)
        .await?;

    let reset_token = state
        .config
        .email
        .expose_debug_tokens
        .then(|| requested.reset_token.plaintext.clone());

    Ok(Json(ApiResponse::ok(ResetRequestedResponse {
        message: "Password reset instructions have been sent".to_string(),
        reset_token,
    })))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()?;

    state
        .security_service
        .reset_password(&req.token, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password has been reset".to_string(),
    })))
}
