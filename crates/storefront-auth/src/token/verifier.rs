//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use storefront_core::config::AuthConfig;
use storefront_core::{AppError, AppResult};

use super::claims::Claims;

/// Validates session token signatures and expiry.
///
/// Expiry is reported distinctly from every other failure so clients
/// can tell "sign in again" apart from "this token was never valid".
#[derive(Clone)]
pub struct SessionVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl SessionVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token string.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::token_expired("Session has expired")
                }
                _ => AppError::token_invalid("Session token is invalid"),
            }
        })?;

        Ok(data.claims)
    }
}
