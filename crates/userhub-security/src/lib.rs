//! # UserHub Security
//!
//! One-way password hashing used before credentials reach the store.

pub mod password;

pub use password::*;
