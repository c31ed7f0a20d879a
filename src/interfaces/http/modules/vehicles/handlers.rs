//! Vehicle API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleDto};
use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, MessageResponse, Path, ValidatedJson,
};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's vehicles", body = ApiResponse<Vec<VehicleDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ApiResponse<Vec<VehicleDto>>>> {
    let vehicles = state.vehicles.list_own(&user).await?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle added", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "VIN already registered")
    )
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<VehicleDto>>)> {
    let vehicle = state.vehicles.create(&user, request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleDto::from(vehicle))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<VehicleDto>>> {
    let vehicle = state.vehicles.get(&user, id).await?;
    Ok(Json(ApiResponse::success(VehicleDto::from(vehicle))))
}

#[utoipa::path(
    put,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse<VehicleDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> ApiResult<Json<ApiResponse<VehicleDto>>> {
    let vehicle = state.vehicles.update(&user, id, request.into()).await?;
    Ok(Json(ApiResponse::success(VehicleDto::from(vehicle))))
}

#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle and its appointments deleted", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.vehicles.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Vehicle deleted",
    ))))
}
