//! # UserHub Service
//!
//! Service layer for UserHub: transport objects, entity mapping, the two
//! cache tiers and the user service that orchestrates them.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use mappers::UserMapper;
pub use r#impl::{CacheSettings, UserServiceComponent, UserServiceComponentParameters};
pub use user_service::*;
