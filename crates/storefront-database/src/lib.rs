//! Persistence layer: connection pooling, migrations and the account store.
//!
//! The [`store::AccountStore`] trait abstracts every query the services
//! need; [`store::build_store`] picks a backend from the configured
//! provider so the rest of the workspace never touches SQL directly.

pub mod connection;
pub mod migration;
pub mod store;

pub use connection::DatabasePool;
pub use store::{build_store, AccountStore};
