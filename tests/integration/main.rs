//! Integration test suite, run against the in-memory providers.

mod helpers;

mod admin_test;
mod auth_test;
mod lockout_test;
mod token_test;
