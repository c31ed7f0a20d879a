//! API Router with Swagger UI

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, MessageResponse};
use super::middleware::{require_admin, require_auth};
use super::modules::{
    appointments, auth, health, notifications, search, services, settings, users, vehicle_types,
    vehicles,
};
use super::AppState;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Session token from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::index,
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::logout,
        auth::get_current_user,
        auth::change_password,
        auth::request_password_reset,
        auth::confirm_password_reset,
        // Services
        services::list_services,
        services::list_all_services,
        services::get_service,
        services::create_service,
        services::update_service,
        services::delete_service,
        // Appointments
        appointments::list_appointments,
        appointments::create_appointment,
        appointments::get_appointment,
        appointments::update_appointment,
        appointments::cancel_appointment,
        appointments::delete_appointment,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::create_vehicle,
        vehicles::get_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        // Vehicle types
        vehicle_types::list_vehicle_types,
        vehicle_types::create_vehicle_type,
        vehicle_types::delete_vehicle_type,
        // Notifications
        notifications::list_notifications,
        notifications::unread_count,
        notifications::mark_read,
        notifications::mark_all_read,
        notifications::delete_notification,
        notifications::broadcast,
        // Settings
        settings::get_settings,
        settings::update_settings,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Search
        search::search_users,
        search::search_vehicles,
        search::search_appointments,
        search::search_services,
    ),
    components(
        schemas(
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            health::IndexResponse,
            auth::LoginRequest,
            auth::AuthResponse,
            auth::RegisterRequest,
            auth::ChangePasswordRequest,
            auth::PasswordResetRequest,
            auth::PasswordResetTokenResponse,
            auth::PasswordResetConfirmRequest,
            users::UserDto,
            users::UpdateUserRequest,
            services::ServiceDto,
            services::CreateServiceRequest,
            services::UpdateServiceRequest,
            appointments::AppointmentDto,
            appointments::CreateAppointmentRequest,
            appointments::UpdateAppointmentRequest,
            vehicles::VehicleDto,
            vehicles::VehicleWithOwnerDto,
            vehicles::CreateVehicleRequest,
            vehicles::UpdateVehicleRequest,
            vehicle_types::VehicleTypeDto,
            vehicle_types::CreateVehicleTypeRequest,
            notifications::NotificationDto,
            notifications::UnreadCountResponse,
            notifications::MarkAllReadResponse,
            notifications::BroadcastRequest,
            notifications::BroadcastResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and API overview"),
        (name = "Authentication", description = "Login, registration, logout, password change and reset"),
        (name = "Services", description = "Service catalog"),
        (name = "Appointments", description = "Booking and tracking service appointments"),
        (name = "Vehicles", description = "Customer vehicles"),
        (name = "Vehicle Types", description = "System and custom vehicle categories"),
        (name = "Notifications", description = "Per-user notifications and admin broadcasts"),
        (name = "Settings", description = "Shop-wide key-value settings"),
        (name = "Users", description = "User administration"),
        (name = "Search", description = "Substring search over users, vehicles, appointments and services"),
    ),
    info(
        title = "Auto-service Shop API",
        version = "1.0.0",
        description = "REST API for an auto-service shop: catalog, vehicles, appointments and notifications",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn authenticated(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

fn admin_only(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}

async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Endpoint not found")),
    )
}

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes
    let auth_public = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/password-reset/request", post(auth::request_password_reset))
        .route("/password-reset/confirm", post(auth::confirm_password_reset));
    let auth_protected = authenticated(
        Router::new()
            .route("/logout", post(auth::logout))
            .route("/me", get(auth::get_current_user))
            .route("/change-password", put(auth::change_password)),
        &state,
    );

    // Service catalog: reads are public, writes admin-only
    let service_public = Router::new()
        .route("/", get(services::list_services))
        .route("/{id}", get(services::get_service));
    let service_admin = admin_only(
        Router::new()
            .route("/", post(services::create_service))
            .route(
                "/{id}",
                put(services::update_service).delete(services::delete_service),
            ),
        &state,
    );

    let appointment_routes = authenticated(
        Router::new()
            .route(
                "/",
                get(appointments::list_appointments).post(appointments::create_appointment),
            )
            .route(
                "/{id}",
                get(appointments::get_appointment)
                    .put(appointments::update_appointment)
                    .delete(appointments::cancel_appointment),
            ),
        &state,
    );

    let vehicle_routes = authenticated(
        Router::new()
            .route("/", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
            .route(
                "/{id}",
                get(vehicles::get_vehicle)
                    .put(vehicles::update_vehicle)
                    .delete(vehicles::delete_vehicle),
            ),
        &state,
    );

    let vehicle_type_public =
        Router::new().route("/", get(vehicle_types::list_vehicle_types));
    let vehicle_type_protected = authenticated(
        Router::new()
            .route("/", post(vehicle_types::create_vehicle_type))
            .route("/{id}", delete(vehicle_types::delete_vehicle_type)),
        &state,
    );

    let notification_routes = authenticated(
        Router::new()
            .route("/", get(notifications::list_notifications))
            .route("/unread-count", get(notifications::unread_count))
            .route("/read-all", put(notifications::mark_all_read))
            .route("/{id}", delete(notifications::delete_notification))
            .route("/{id}/read", put(notifications::mark_read)),
        &state,
    );
    let notification_admin = admin_only(
        Router::new().route("/broadcast", post(notifications::broadcast)),
        &state,
    );

    let settings_public = Router::new().route("/", get(settings::get_settings));
    let settings_admin = admin_only(
        Router::new().route("/", post(settings::update_settings)),
        &state,
    );

    let user_routes = admin_only(
        Router::new().route("/", get(users::list_users)).route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        ),
        &state,
    );

    let search_protected = authenticated(
        Router::new().route("/services", get(search::search_services)),
        &state,
    );
    let search_admin = admin_only(
        Router::new()
            .route("/users", get(search::search_users))
            .route("/vehicles", get(search::search_vehicles))
            .route("/appointments", get(search::search_appointments)),
        &state,
    );

    let admin_routes = admin_only(
        Router::new()
            .route("/services", get(services::list_all_services))
            .route("/appointments/{id}", delete(appointments::delete_appointment)),
        &state,
    );

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let api = Router::new()
        .route("/", get(health::index))
        .route("/api/health", get(health::health_check))
        .nest("/api/auth", auth_public.merge(auth_protected))
        .nest("/api/services", service_public.merge(service_admin))
        .nest("/api/appointments", appointment_routes)
        .nest("/api/vehicles", vehicle_routes)
        .nest(
            "/api/vehicle-types",
            vehicle_type_public.merge(vehicle_type_protected),
        )
        .nest(
            "/api/notifications",
            notification_routes.merge(notification_admin),
        )
        .nest("/api/settings", settings_public.merge(settings_admin))
        .nest("/api/users", user_routes)
        .nest("/api/search", search_protected.merge(search_admin))
        .nest("/api/admin", admin_routes)
        .fallback(endpoint_not_found)
        .with_state(state);

    Router::new()
        .merge(swagger_routes)
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
