//! Persistence entities.

mod role;
mod user;

pub use role::{Role, DEFAULT_ROLE};
pub use user::{User, UserWithRole};
