//! Unified error type for every layer of the service.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for UserHub.
///
/// Client errors (validation, identity mismatch, not found, conflict) map to
/// 4xx statuses; every collaborator fault maps to a generic 500.
#[derive(Error, Debug)]
pub enum HubError {
    // ============ Client Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Route identifier differs from the identifier in the request body
    #[error("Identifier mismatch: path {path} does not match body {body}")]
    IdMismatch { path: String, body: String },

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cache tier error (local or distributed)
    #[error("Cache error: {0}")]
    Cache(String),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HubError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::IdMismatch { .. } => 400,
            Self::Conflict(_) => 409,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::PasswordHash(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::IdMismatch { .. } => "ID_MISMATCH",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::PasswordHash(_) => "PASSWORD_HASH_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an identifier mismatch error.
    #[must_use]
    pub fn id_mismatch<P: ToString, B: ToString>(path: P, body: B) -> Self {
        Self::IdMismatch {
            path: path.to_string(),
            body: body.to_string(),
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for errors caused by the caller rather than a collaborator.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for HubError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    // PostgreSQL / MySQL unique violation
                    if code == "23505" || code == "1062" || code == "23000" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Serializable error body written by the REST layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `HubError`.
    #[must_use]
    pub fn from_error(error: &HubError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&HubError> for ErrorResponse {
    fn from(error: &HubError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status_codes() {
        assert_eq!(HubError::not_found("User", 1).status_code(), 404);
        assert_eq!(HubError::validation("invalid email").status_code(), 400);
        assert_eq!(HubError::id_mismatch("a", "b").status_code(), 400);
        assert_eq!(HubError::conflict("duplicate").status_code(), 409);
    }

    #[test]
    fn test_collaborator_faults_are_server_errors() {
        assert_eq!(HubError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(HubError::cache("redis down").status_code(), 500);
        assert_eq!(HubError::PasswordHash("bad salt".to_string()).status_code(), 500);
        assert_eq!(HubError::internal("oops").status_code(), 500);
        assert_eq!(HubError::from(anyhow::anyhow!("boom")).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(HubError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(HubError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(HubError::id_mismatch("a", "b").error_code(), "ID_MISMATCH");
        assert_eq!(HubError::cache("x").error_code(), "CACHE_ERROR");
        assert_eq!(HubError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_is_client_error() {
        assert!(HubError::validation("bad").is_client_error());
        assert!(HubError::not_found("User", 1).is_client_error());
        assert!(!HubError::cache("down").is_client_error());
    }

    #[test]
    fn test_id_mismatch_message_names_both_ids() {
        let err = HubError::id_mismatch("path-id", "body-id");
        let message = err.to_string();
        assert!(message.contains("path-id"));
        assert!(message.contains("body-id"));
    }

    #[test]
    fn test_json_error_maps_to_internal() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = HubError::from(json_err);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_response_from_error() {
        let err = HubError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = HubError::validation("bad input");
        let details = vec![FieldError {
            field: "email".to_string(),
            message: "Invalid email".to_string(),
            code: "email".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
