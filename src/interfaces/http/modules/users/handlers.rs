//! User management API handlers
//!
//! Admin-only endpoints. Delegates to `UserAdminService`.

use axum::{
    extract::State,
    Extension, Json,
};

use super::dto::{UpdateUserRequest, UserDto};
use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, MessageResponse, Path, ValidatedJson,
};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ApiResponse<Vec<UserDto>>>> {
    let users = state.users.list(&user).await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let found = state.users.get(&user, id).await?;
    Ok(Json(ApiResponse::success(UserDto::from(found))))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Own role or active flag cannot be changed"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let updated = state.users.update(&user, id, request.into_dto()?).await?;
    Ok(Json(ApiResponse::success(UserDto::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Own account cannot be deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.users.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("User deleted"))))
}
