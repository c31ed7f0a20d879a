//! Search API handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{ApiResponse, ApiResult};
use crate::interfaces::http::modules::appointments::AppointmentDto;
use crate::interfaces::http::modules::services::ServiceDto;
use crate::interfaces::http::modules::users::UserDto;
use crate::interfaces::http::modules::vehicles::VehicleWithOwnerDto;
use crate::interfaces::http::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring
    #[serde(default)]
    pub q: String,
}

#[utoipa::path(
    get,
    path = "/api/search/users",
    tag = "Search",
    security(("bearer_auth" = [])),
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching users", body = ApiResponse<Vec<UserDto>>),
        (status = 400, description = "Empty query"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn search_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<ApiResponse<Vec<UserDto>>>> {
    let users = state.search.users(&user, &query.q).await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/search/vehicles",
    tag = "Search",
    security(("bearer_auth" = [])),
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching vehicles with owners", body = ApiResponse<Vec<VehicleWithOwnerDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn search_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<ApiResponse<Vec<VehicleWithOwnerDto>>>> {
    let vehicles = state.search.vehicles(&user, &query.q).await?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleWithOwnerDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/search/appointments",
    tag = "Search",
    security(("bearer_auth" = [])),
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching appointments", body = ApiResponse<Vec<AppointmentDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn search_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<ApiResponse<Vec<AppointmentDto>>>> {
    let appointments = state.search.appointments(&user, &query.q).await?;
    Ok(Json(ApiResponse::success(
        appointments.into_iter().map(AppointmentDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/search/services",
    tag = "Search",
    security(("bearer_auth" = [])),
    params(SearchQuery),
    responses((status = 200, description = "Matching services", body = ApiResponse<Vec<ServiceDto>>))
)]
pub async fn search_services(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<ApiResponse<Vec<ServiceDto>>>> {
    let services = state.search.services(&query.q).await?;
    Ok(Json(ApiResponse::success(
        services.into_iter().map(ServiceDto::from).collect(),
    )))
}
