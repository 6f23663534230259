//! Account domain entities.

pub mod model;
pub mod role;

pub use model::{Account, NewAccount};
pub use role::Role;
