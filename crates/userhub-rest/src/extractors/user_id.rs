//! User id path parameter.

use crate::responses::AppError;
use userhub_core::{HubError, UserId};

/// Parses a path segment into a [`UserId`], rejecting malformed UUIDs with 400.
pub fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id).map_err(|_| AppError(HubError::validation(format!("Invalid user ID: {id}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        let id = UserId::new();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);
        assert!(parse_user_id("not-a-uuid").is_err());
    }
}
