//! Account self-service handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use crate::dto::request::{ChangePasswordRequest, UpdateProfileRequest};
use crate::dto::response::{AccountResponse, ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// GET /api/account
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.profile_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/account
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    req.validate()?;

    let account = state
        .profile_service
        .update_profile(&auth, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/account/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()?;

    state
        .security_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password changed successfully".to_string(),
    })))
}

/// GET /api/accounts/{id}
///
/// Readable by the account owner and by administrators.
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.profile_service.get_account(&auth, id).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}
