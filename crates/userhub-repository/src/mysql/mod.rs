//! MySQL implementations.

mod table;
mod unit_of_work;
mod user_repository;

pub use table::*;
pub use unit_of_work::*;
pub use user_repository::*;
