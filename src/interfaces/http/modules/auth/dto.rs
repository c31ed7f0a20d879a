//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::RegisterUser;
use crate::interfaces::http::modules::users::UserDto;

/// Login with username or email
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username or email
    #[validate(length(min = 1, message = "is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(r: RegisterRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            password: r.password,
            full_name: r.full_name,
            phone: r.phone,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordResetRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// Issued reset token. There is no mail delivery, so the token is handed
/// back to the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct PasswordResetTokenResponse {
    pub reset_token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub token: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub new_password: String,
}
