//! Entity-DTO mappers.

use crate::dto::{UserDto, UserInput, UserWithRoleDto};
use userhub_core::{Mapper, User, UserId, UserWithRole};

/// Maps between the `User` entity and its transport objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserMapper;

impl Mapper<User, UserDto> for UserMapper {
    fn map(user: User) -> UserDto {
        UserDto {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            role: user.role,
        }
    }
}

impl Mapper<UserWithRole, UserWithRoleDto> for UserMapper {
    fn map(loaded: UserWithRole) -> UserWithRoleDto {
        UserWithRoleDto {
            user: <Self as Mapper<User, UserDto>>::map(loaded.user),
            role_details: loaded.role,
        }
    }
}

impl UserMapper {
    /// Builds an entity from a write model.
    ///
    /// The plaintext password is dropped; `password_hash` must already be the
    /// one-way hash of it. A missing or nil identifier gets a fresh one.
    #[must_use]
    pub fn to_entity(input: UserInput, password_hash: String) -> User {
        let id = input.id.filter(|id| !id.is_nil()).unwrap_or_else(UserId::new);
        User::new(input.user_name, input.email, password_hash, input.role).with_id(id)
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        <UserMapper as Mapper<User, UserDto>>::map(user)
    }
}

impl From<UserWithRole> for UserWithRoleDto {
    fn from(loaded: UserWithRole) -> Self {
        <UserMapper as Mapper<UserWithRole, UserWithRoleDto>>::map(loaded)
    }
}
