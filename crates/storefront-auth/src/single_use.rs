//! Random single-use tokens for email verification and password resets.
//!
//! The plaintext leaves the process exactly once, inside the email sent
//! to the account owner. Only the SHA-256 digest is persisted, so a
//! database leak does not hand out working links.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes behind each token; hex-encodes to 64 chars.
const TOKEN_BYTES: usize = 32;

/// A freshly generated single-use token.
#[derive(Debug, Clone)]
pub struct SingleUseToken {
    /// The value mailed to the account owner. Never stored.
    pub plaintext: String,
    /// SHA-256 digest of the plaintext, hex-encoded. This is what the
    /// store keeps and what lookups match against.
    pub digest: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl SingleUseToken {
    /// Generates a fresh token valid for `ttl` from now.
    pub fn generate(ttl: Duration) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let plaintext = hex::encode(bytes);
        let digest = Self::digest_of(&plaintext);

        Self {
            plaintext,
            digest,
            expires_at: Utc::now() + ttl,
        }
    }

    /// Digest of a submitted plaintext, for matching against the store.
    pub fn digest_of(plaintext: &str) -> String {
        hex::encode(Sha256::digest(plaintext.as_bytes()))
    }
}
