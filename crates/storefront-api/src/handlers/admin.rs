//! Admin account management handlers.
//!
//! Authorization lives in the service layer; these handlers only
//! translate between HTTP and service calls.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use storefront_entity::account::Role;
use storefront_service::account::CreateAccountData;

use crate::dto::request::{ChangeRoleRequest, ChangeStatusRequest, CreateAccountRequest};
use crate::dto::response::{AccountResponse, ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// POST /api/admin/accounts
pub async fn create_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    req.validate()?;
    let role: Role = req.role.parse()?;

    let account = state
        .admin_service
        .create_account(
            &auth,
            CreateAccountData {
                email: req.email,
                name: req.name,
                password: req.password,
                role,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account.into()))))
}

/// GET /api/admin/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.admin_service.get_account(&auth, id).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/admin/accounts/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let role: Role = req.role.parse()?;

    let account = state.admin_service.change_role(&auth, id, role).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/admin/accounts/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state
        .admin_service
        .set_active(&auth, id, req.active)
        .await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// DELETE /api/admin/accounts/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.admin_service.delete_account(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Account deleted".to_string(),
    })))
}
