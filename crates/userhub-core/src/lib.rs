//! # UserHub Core
//!
//! Core types, traits, and error definitions shared by every UserHub crate:
//! the unified error type, typed identifiers, the persistence entities, and
//! the generic repository contract.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, Component, HasComponent, Interface};
