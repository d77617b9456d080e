//! Result type alias for UserHub.

use crate::HubError;

/// A specialized `Result` type for UserHub operations.
pub type HubResult<T> = Result<T, HubError>;
