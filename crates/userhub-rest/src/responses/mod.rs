//! API response types.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use userhub_core::{ErrorResponse, HubError};

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub HubError);

impl From<HubError> for AppError {
    fn from(err: HubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if status.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
            ErrorResponse {
                code: self.0.error_code().to_string(),
                message: "An internal error occurred".to_string(),
                details: None,
            }
        } else {
            ErrorResponse::from_error(&self.0)
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Helper to create a created (201) response with a `Location` header.
pub fn created<T: Serialize>(location: String, data: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(data),
    )
        .into_response()
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status() {
        let response = AppError(HubError::not_found("User", "42")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError(HubError::id_mismatch("a", "b")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_error_status() {
        let response = AppError(HubError::cache("redis down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_created_sets_location() {
        let response = created("/api/users/1".to_string(), "body");
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/users/1");
    }
}
