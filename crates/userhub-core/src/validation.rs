//! Validation utilities.

use crate::{FieldError, HubError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `HubError` on failure.
    fn validate_request(&self) -> Result<(), HubError> {
        self.validate().map_err(validation_errors_to_hub_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors, sorted by field name.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `HubError`.
#[must_use]
pub fn validation_errors_to_hub_error(errors: ValidationErrors) -> HubError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    HubError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::not_blank;
    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_validate_request_passes() {
        let probe = Probe {
            name: "x".to_string(),
            email: "x@example.com".to_string(),
        };
        assert!(probe.validate_request().is_ok());
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let probe = Probe {
            name: String::new(),
            email: "nope".to_string(),
        };
        let err = probe.validate_request().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("name: Name is required"));
        assert!(message.contains("email: email"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_field_errors_sorted() {
        let probe = Probe {
            name: String::new(),
            email: "nope".to_string(),
        };
        let errors = probe.validate().unwrap_err();
        let fields: Vec<_> = field_errors(&errors).into_iter().map(|f| f.field).collect();
        assert_eq!(fields, vec!["email".to_string(), "name".to_string()]);
    }
}
