//! Account services: security lifecycle, self-service profile,
//! administrative management.

pub mod admin;
pub mod profile;
pub mod security;

pub use admin::{AdminAccountService, CreateAccountData};
pub use profile::ProfileService;
pub use security::{
    AccountSecurityService, LoginOutcome, RegistrationOutcome, ResetRequested,
};
