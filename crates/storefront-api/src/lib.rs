//! # storefront-api
//!
//! HTTP API layer for Storefront built on Axum.
//!
//! Provides the REST endpoints for registration, login, password
//! lifecycle, email verification and account administration, plus the
//! extractors, DTOs and error mapping they share.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
