//! Password policy enforcement for new passwords.

use storefront_core::config::AuthConfig;
use storefront_core::{AppError, AppResult};

/// Checks candidate passwords against the configured policy before
/// they are ever hashed.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length, from configuration.
    min_length: usize,
}

impl PasswordValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Rejects a candidate password that fails any policy rule,
    /// reporting the first violation found.
    ///
    /// Beyond the character-class rules, the candidate must score at
    /// least 3 on the zxcvbn strength estimate, which catches common
    /// words and keyboard walks that satisfy the class rules.
    pub fn validate(&self, password: &str) -> AppResult<()> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(char::is_uppercase) {
            return Err(AppError::validation(
                "Password must contain an uppercase letter",
            ));
        }

        if !password.chars().any(char::is_lowercase) {
            return Err(AppError::validation(
                "Password must contain a lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("Password must contain a digit"));
        }

        if !password.chars().any(|c| !c.is_alphanumeric()) {
            return Err(AppError::validation(
                "Password must contain a special character",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too easy to guess, choose a stronger one",
            ));
        }

        Ok(())
    }

    /// Rejects a password change that keeps the same password.
    pub fn validate_not_same(&self, current: &str, candidate: &str) -> AppResult<()> {
        if current == candidate {
            return Err(AppError::validation(
                "New password must differ from the current password",
            ));
        }
        Ok(())
    }
}
