//! Settings API handlers
//!
//! Settings travel as a flat JSON object. Known keys are type-checked
//! (`tax_rate` must be a number between 0 and 100, `booking_enabled` a
//! boolean, the rest strings); unknown keys are stored as given.

use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};
use serde_json::Value;

use crate::application::AuthenticatedUser;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ApiResult, JsonBody};
use crate::interfaces::http::AppState;

pub type SettingsMap = BTreeMap<String, Value>;

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses((status = 200, description = "Every setting", body = Object))
)]
pub async fn get_settings(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<SettingsMap>>> {
    Ok(Json(ApiResponse::success(state.settings.all().await?)))
}

#[utoipa::path(
    post,
    path = "/api/settings",
    tag = "Settings",
    security(("bearer_auth" = [])),
    request_body(content = Object, description = "Keys to upsert"),
    responses(
        (status = 200, description = "Settings after the update", body = Object),
        (status = 400, description = "Body is not an object, or a known key has the wrong type"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<Value>,
) -> ApiResult<Json<ApiResponse<SettingsMap>>> {
    let Value::Object(object) = body else {
        return Err(DomainError::Validation("Settings must be a dictionary".into()).into());
    };
    let entries: SettingsMap = object.into_iter().collect();
    let settings = state.settings.update(&user, entries).await?;
    Ok(Json(ApiResponse::success(settings)))
}
