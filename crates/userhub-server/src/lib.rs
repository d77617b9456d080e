//! # UserHub Server Library
//!
//! Composition root for the UserHub server: dependency injection wiring,
//! tracing setup and startup helpers.

pub mod di;
pub mod startup;
pub mod telemetry;
