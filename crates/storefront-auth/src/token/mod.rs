//! Signed session token issuing and verification.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use issuer::{IssuedSession, SessionIssuer};
pub use verifier::SessionVerifier;
