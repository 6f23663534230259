//! Failed-login counting and temporary account locks.

use chrono::{DateTime, Duration, Utc};
use storefront_core::config::AuthConfig;

/// Decides when repeated login failures lock an account.
///
/// The policy itself is pure; callers persist the outcome. Locks are
/// lazy: nothing unlocks an account actively, it simply stops counting
/// as locked once `locked_until` passes. The failure counter survives
/// the lock expiring, so the next failure after an expired lock locks
/// the account again immediately until a successful login or a
/// password reset clears the counter.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    /// Failures at or above this count trigger a lock.
    max_failed_attempts: i32,
    /// How long each lock lasts.
    lockout_duration: Duration,
}

/// What the store should record after one more failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureOutcome {
    /// New value for the failure counter.
    pub attempts: i32,
    /// Lock expiry to persist, when the threshold was reached.
    pub locked_until: Option<DateTime<Utc>>,
}

impl LockoutPolicy {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            max_failed_attempts: config.max_failed_attempts,
            lockout_duration: Duration::minutes(config.lockout_duration_minutes as i64),
        }
    }

    /// Registers one more failure on top of `current_attempts`.
    pub fn register_failure(&self, current_attempts: i32, now: DateTime<Utc>) -> FailureOutcome {
        let attempts = current_attempts.saturating_add(1);
        let locked_until =
            (attempts >= self.max_failed_attempts).then(|| now + self.lockout_duration);

        FailureOutcome {
            attempts,
            locked_until,
        }
    }
}
