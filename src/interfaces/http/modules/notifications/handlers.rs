//! Notification API handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use super::dto::{
    BroadcastRequest, BroadcastResponse, MarkAllReadResponse, NotificationDto,
    NotificationListQuery, UnreadCountResponse,
};
use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, MessageResponse, Path, ValidatedJson,
};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(NotificationListQuery),
    responses((status = 200, description = "Caller's notifications, newest first", body = ApiResponse<Vec<NotificationDto>>))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<NotificationListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<NotificationDto>>>> {
    let notifications = state.notifications.list(&user, query.unread_only).await?;
    Ok(Json(ApiResponse::success(
        notifications.into_iter().map(NotificationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Unread count", body = ApiResponse<UnreadCountResponse>))
)]
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ApiResponse<UnreadCountResponse>>> {
    let count = state.notifications.unread_count(&user).await?;
    Ok(Json(ApiResponse::success(UnreadCountResponse { count })))
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked read", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Not the recipient"),
        (status = 404, description = "Not found")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.notifications.mark_read(&user, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Notification marked as read",
    ))))
}

#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All marked read", body = ApiResponse<MarkAllReadResponse>))
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ApiResponse<MarkAllReadResponse>>> {
    let updated = state.notifications.mark_all_read(&user).await?;
    Ok(Json(ApiResponse::success(MarkAllReadResponse { updated })))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Not the recipient"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.notifications.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Notification deleted",
    ))))
}

#[utoipa::path(
    post,
    path = "/api/notifications/broadcast",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    request_body = BroadcastRequest,
    responses(
        (status = 200, description = "Sent to every active user", body = ApiResponse<BroadcastResponse>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn broadcast(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<BroadcastRequest>,
) -> ApiResult<Json<ApiResponse<BroadcastResponse>>> {
    let recipients = state.notifications.broadcast(&user, request.into()).await?;
    Ok(Json(ApiResponse::success(BroadcastResponse { recipients })))
}
