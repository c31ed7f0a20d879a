//! Vehicle type API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateVehicleTypeRequest, VehicleTypeDto};
use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, MessageResponse, Path, ValidatedJson,
};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/vehicle-types",
    tag = "Vehicle Types",
    responses((status = 200, description = "System and custom vehicle types", body = ApiResponse<Vec<VehicleTypeDto>>))
)]
pub async fn list_vehicle_types(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<VehicleTypeDto>>>> {
    let types = state.vehicle_types.list().await?;
    Ok(Json(ApiResponse::success(
        types.into_iter().map(VehicleTypeDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/vehicle-types",
    tag = "Vehicle Types",
    security(("bearer_auth" = [])),
    request_body = CreateVehicleTypeRequest,
    responses(
        (status = 201, description = "Vehicle type created", body = ApiResponse<VehicleTypeDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_vehicle_type(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateVehicleTypeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<VehicleTypeDto>>)> {
    let created = state
        .vehicle_types
        .create(&user, &request.name, request.description, request.icon)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleTypeDto::from(created))),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/vehicle-types/{id}",
    tag = "Vehicle Types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle type ID")),
    responses(
        (status = 200, description = "Vehicle type deleted", body = ApiResponse<MessageResponse>),
        (status = 403, description = "System type, or not the creator"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_vehicle_type(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.vehicle_types.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Vehicle type deleted",
    ))))
}
