//! # storefront-service
//!
//! Business logic layer for Storefront accounts. Each service
//! orchestrates the account store, password primitives, token issuing
//! and outbound mail to implement one slice of use cases.
//!
//! Services follow constructor injection — all dependencies are
//! provided at construction time via `Arc` references.

pub mod account;
pub mod context;

pub use account::{AccountSecurityService, AdminAccountService, ProfileService};
pub use context::RequestContext;
