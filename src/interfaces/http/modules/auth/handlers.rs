//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, PasswordResetConfirmRequest,
    PasswordResetRequest, PasswordResetTokenResponse, RegisterRequest,
};
use crate::application::{AuthResult, AuthenticatedUser};
use crate::interfaces::http::common::{ApiResponse, ApiResult, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::SessionToken;
use crate::interfaces::http::modules::users::UserDto;
use crate::interfaces::http::AppState;

impl From<AuthResult> for AuthResponse {
    fn from(r: AuthResult) -> Self {
        Self {
            token: r.token,
            user: UserDto::from(r.user),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    let result = state.auth.login(&request.username, &request.password).await?;
    Ok(Json(ApiResponse::success(result.into())))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created and signed in", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let result = state.auth.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(result.into()))))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session ended", body = ApiResponse<MessageResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<ApiResponse<MessageResponse>> {
    state.auth.logout(&token).await;
    Json(ApiResponse::success(MessageResponse::new("Logged out")))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let current = state.auth.current_user(&user).await?;
    Ok(Json(ApiResponse::success(UserDto::from(current))))
}

#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Current password is incorrect"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .auth
        .change_password(&user, &request.current_password, &request.new_password)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password changed",
    ))))
}

#[utoipa::path(
    post,
    path = "/api/auth/password-reset/request",
    tag = "Authentication",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset token issued", body = ApiResponse<PasswordResetTokenResponse>),
        (status = 404, description = "No account with this email")
    )
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PasswordResetRequest>,
) -> ApiResult<Json<ApiResponse<PasswordResetTokenResponse>>> {
    let reset_token = state.auth.request_password_reset(&request.email).await?;
    Ok(Json(ApiResponse::success(PasswordResetTokenResponse {
        reset_token,
    })))
}

#[utoipa::path(
    post,
    path = "/api/auth/password-reset/confirm",
    tag = "Authentication",
    request_body = PasswordResetConfirmRequest,
    responses(
        (status = 200, description = "Password reset", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PasswordResetConfirmRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .auth
        .reset_password(&request.token, &request.new_password)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password has been reset",
    ))))
}
