//! # storefront-auth
//!
//! Credential handling and access control primitives for the Storefront
//! platform.
//!
//! ## Modules
//!
//! - `password` — Argon2id hashing and password policy enforcement
//! - `token` — signed session token issuing and verification
//! - `single_use` — random one-shot tokens for email verification and
//!   password resets, stored only as digests
//! - `lockout` — failed-login counting and temporary account locks
//! - `rbac` — role and ownership checks

pub mod lockout;
pub mod password;
pub mod rbac;
pub mod single_use;
pub mod token;

pub use lockout::LockoutPolicy;
pub use password::{PasswordHasher, PasswordValidator};
pub use single_use::SingleUseToken;
pub use token::{Claims, SessionIssuer, SessionVerifier};
