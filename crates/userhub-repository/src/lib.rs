//! # UserHub Repository
//!
//! Data access for UserHub:
//!
//! ```text
//! Service
//!   ↓  Box<dyn UnitOfWork>        (one per service call)
//! MySqlUnitOfWork                 (single-transaction commit)
//!   ↓  &dyn UserRepository
//! MySqlUserRepository             (role-aware reads)
//!   ↓
//! MySqlRepository<User>           (generic CRUD, staged writes)
//!   ↓
//! MySQL
//! ```

pub mod change_set;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use change_set::{Change, ChangeSet};
pub use mysql::*;
pub use pool::*;
pub use traits::*;
