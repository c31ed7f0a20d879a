//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::UpdateUserDto;
use crate::domain::{DomainError, DomainResult, User, UserRole};

/// User API representation. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// `user` or `admin`
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            phone: u.phone,
            role: u.role.as_str().to_string(),
            is_active: u.is_active,
            created_at: u.created_at,
            last_login_at: u.last_login_at,
        }
    }
}

/// Update user request (admin). Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    /// `user` or `admin`
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn into_dto(self) -> DomainResult<UpdateUserDto> {
        let role = match self.role.as_deref() {
            Some(raw) => Some(UserRole::parse(raw).ok_or_else(|| {
                DomainError::Validation(format!("Unknown role '{}'", raw))
            })?),
            None => None,
        };

        Ok(UpdateUserDto {
            email: self.email,
            full_name: self.full_name,
            phone: self.phone,
            role,
            is_active: self.is_active,
        })
    }
}
