//! Health check and capability listing

use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use utoipa::ToSchema;

use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::AppState;

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    let db_start = Instant::now();
    let database = match state
        .db
        .execute(Statement::from_string(
            state.db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await
    {
        Ok(_) => ComponentHealth {
            status: "ok".to_string(),
            latency_ms: Some(db_start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            ComponentHealth {
                status: "error".to_string(),
                latency_ms: None,
            }
        }
    };

    let healthy = database.status == "ok";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            database,
        }),
    )
}

/// Entry point summary
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    pub name: String,
    pub version: String,
    pub documentation: String,
    pub endpoints: Vec<String>,
}

const ENDPOINT_GROUPS: [&str; 11] = [
    "/api/health",
    "/api/auth",
    "/api/services",
    "/api/appointments",
    "/api/vehicles",
    "/api/vehicle-types",
    "/api/notifications",
    "/api/settings",
    "/api/users",
    "/api/search",
    "/api/admin",
];

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "API overview", body = ApiResponse<IndexResponse>))
)]
pub async fn index() -> Json<ApiResponse<IndexResponse>> {
    Json(ApiResponse::success(IndexResponse {
        name: "Auto-service shop API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documentation: "/docs".to_string(),
        endpoints: ENDPOINT_GROUPS.iter().map(|e| e.to_string()).collect(),
    }))
}
