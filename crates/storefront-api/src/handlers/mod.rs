//! Route handlers organized by domain.

pub mod account;
pub mod admin;
pub mod auth;
pub mod health;
