//! Service catalog API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateServiceRequest, ServiceDto, UpdateServiceRequest};
use crate::application::AuthenticatedUser;
use crate::domain::Service;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, MessageResponse, Path, ValidatedJson,
};
use crate::interfaces::http::AppState;

fn to_dtos(services: Vec<Service>) -> Vec<ServiceDto> {
    services.into_iter().map(ServiceDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Services",
    responses((status = 200, description = "Active services", body = ApiResponse<Vec<ServiceDto>>))
)]
pub async fn list_services(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ServiceDto>>>> {
    let services = state.catalog.list_active().await?;
    Ok(Json(ApiResponse::success(to_dtos(services))))
}

#[utoipa::path(
    get,
    path = "/api/admin/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every service, inactive ones included", body = ApiResponse<Vec<ServiceDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_all_services(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ApiResponse<Vec<ServiceDto>>>> {
    let services = state.catalog.list_all(&user).await?;
    Ok(Json(ApiResponse::success(to_dtos(services))))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service details", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<ServiceDto>>> {
    let service = state.catalog.get(id).await?;
    Ok(Json(ApiResponse::success(ServiceDto::from(service))))
}

#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ApiResponse<ServiceDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateServiceRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ServiceDto>>)> {
    let service = state.catalog.create(&user, request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ServiceDto::from(service))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ApiResponse<ServiceDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateServiceRequest>,
) -> ApiResult<Json<ApiResponse<ServiceDto>>> {
    let service = state.catalog.update(&user, id, request.into()).await?;
    Ok(Json(ApiResponse::success(ServiceDto::from(service))))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service deleted", body = ApiResponse<MessageResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Service has appointments")
    )
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.catalog.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Service deleted",
    ))))
}
