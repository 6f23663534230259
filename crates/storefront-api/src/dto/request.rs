//! Request DTOs with validation.
//!
//! Validation here covers shape only (presence, length, email format);
//! policy checks like password strength live in the service layer.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Password.
    #[validate(length(min = 8))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Email verification request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    /// Single-use verification token from the email link.
    #[validate(length(min = 1))]
    pub token: String,
}

/// Password reset initiation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address of the account to reset.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// Password reset completion request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Single-use reset token from the email link.
    #[validate(length(min = 1))]
    pub token: String,
    /// New password.
    #[validate(length(min = 8))]
    pub password: String,
}

/// Create account request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Initial password.
    #[validate(length(min = 8))]
    pub password: String,
    /// Role name: "user", "moderator" or "admin".
    pub role: String,
}

/// Role change request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role name.
    pub role: String,
}

/// Activation status change request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    /// Whether the account should be active.
    pub active: bool,
}
