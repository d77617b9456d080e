//! User management controller.

use crate::{
    extractors::{parse_user_id, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use tracing::debug;
use userhub_core::{ErrorResponse, HubError};
use userhub_service::{ListUsersQuery, UserDto, UserInput, UserWithRoleDto};

/// Base path the router is nested under.
pub const USERS_PATH: &str = "/api/users";

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/roles", get(list_users_with_roles))
        .route("/by-role/:role", get(list_users_by_role))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/role", get(get_user_with_role))
}

/// List users with search, sort and paging.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = [UserDto])
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Vec<UserDto>> {
    debug!("List users request: {:?}", query);

    let users = state.user_service.list_users(query).await?;
    ok(users)
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses(
        (status = 200, description = "The user", body = UserDto),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserDto> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state
        .user_service
        .get_user(user_id)
        .await?
        .ok_or_else(|| HubError::not_found("User", user_id))?;
    ok(user)
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserDto,
            headers(("Location" = String, description = "URL of the created user"))),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Duplicate id", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UserInput>,
) -> Result<Response, AppError> {
    debug!("Create user request: {}", input.user_name);

    let user = state.user_service.add_user(input).await?;
    let location = format!("{USERS_PATH}/{}", user.id);
    Ok(created(location, user))
}

/// Replace a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id (UUID)")),
    request_body = UserInput,
    responses(
        (status = 204, description = "User replaced"),
        (status = 400, description = "Invalid body or id mismatch", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UserInput>,
) -> Result<StatusCode, AppError> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    match input.id {
        Some(body_id) if body_id == user_id => {}
        Some(body_id) => return Err(HubError::id_mismatch(user_id, body_id).into()),
        None => return Err(HubError::id_mismatch(user_id, "<missing>").into()),
    }

    state.user_service.update_user(input).await?;
    Ok(no_content())
}

/// Delete a user. Deleting an unknown id succeeds.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;
    Ok(no_content())
}

/// List every user with its role aggregate.
#[utoipa::path(
    get,
    path = "/api/users/roles",
    tag = "users",
    responses(
        (status = 200, description = "Users with roles", body = [UserWithRoleDto])
    )
)]
pub async fn list_users_with_roles(State(state): State<AppState>) -> ApiResult<Vec<UserWithRoleDto>> {
    let users = state.user_service.list_users_with_roles().await?;
    ok(users)
}

/// Get one user with its role aggregate.
#[utoipa::path(
    get,
    path = "/api/users/{id}/role",
    tag = "users",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses(
        (status = 200, description = "The user with its role", body = UserWithRoleDto),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn get_user_with_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserWithRoleDto> {
    let user_id = parse_user_id(&id)?;
    let user = state
        .user_service
        .get_user_with_role(user_id)
        .await?
        .ok_or_else(|| HubError::not_found("User", user_id))?;
    ok(user)
}

/// List users carrying a role label.
#[utoipa::path(
    get,
    path = "/api/users/by-role/{role}",
    tag = "users",
    params(("role" = String, Path, description = "Role label")),
    responses(
        (status = 200, description = "Users with the role", body = [UserDto])
    )
)]
pub async fn list_users_by_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Vec<UserDto>> {
    let users = state.user_service.list_users_by_role(&role).await?;
    ok(users)
}
