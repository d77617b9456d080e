//! OpenAPI documentation for the REST API.

use crate::controllers::health_controller::{ComponentHealth, HealthResponse, ReadinessResponse};
use userhub_core::{ErrorResponse, FieldError, Role, UserId};
use userhub_service::{UserDto, UserInput, UserWithRoleDto};
use utoipa::OpenApi;

/// OpenAPI documentation for UserHub.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "UserHub API",
        version = "1.0.0",
        description = "User management REST API with a two-tier read cache",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::user_controller::list_users_with_roles,
        crate::controllers::user_controller::get_user_with_role,
        crate::controllers::user_controller::list_users_by_role,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            Role,
            ErrorResponse,
            FieldError,
            UserDto,
            UserInput,
            UserWithRoleDto,
            HealthResponse,
            ReadinessResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_user_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/users"));
        assert!(doc.paths.paths.contains_key("/api/users/{id}"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
