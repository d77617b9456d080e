//! # UserHub Config
//!
//! Layered configuration for UserHub: TOML files, a `.env` file and
//! `USERHUB__`-prefixed environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
