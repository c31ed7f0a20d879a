//! Appointment API handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AppointmentDto, AppointmentListQuery, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, MessageResponse, Path, ValidatedJson,
};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "Own appointments, or all for admins", body = ApiResponse<Vec<AppointmentDto>>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<AppointmentListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<AppointmentDto>>>> {
    let appointments = state.appointments.list(&user, query.status()?).await?;
    Ok(Json(ApiResponse::success(
        appointments.into_iter().map(AppointmentDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Validation error or booking disabled"),
        (status = 403, description = "Not the vehicle owner"),
        (status = 404, description = "Vehicle or service not found")
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateAppointmentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AppointmentDto>>)> {
    let view = state
        .appointments
        .create(&user, request.into_booking()?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AppointmentDto::from(view))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment details", body = ApiResponse<AppointmentDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<AppointmentDto>>> {
    let view = state.appointments.get(&user, id).await?;
    Ok(Json(ApiResponse::success(AppointmentDto::from(view))))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment updated", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Invalid status transition or terminal appointment"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateAppointmentRequest>,
) -> ApiResult<Json<ApiResponse<AppointmentDto>>> {
    let view = state
        .appointments
        .update(&user, id, request.into_update()?)
        .await?;
    Ok(Json(ApiResponse::success(AppointmentDto::from(view))))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Already completed or cancelled"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<AppointmentDto>>> {
    let view = state.appointments.cancel(&user, id).await?;
    Ok(Json(ApiResponse::success(AppointmentDto::from(view))))
}

#[utoipa::path(
    delete,
    path = "/api/admin/appointments/{id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment removed", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.appointments.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Appointment deleted",
    ))))
}
