//! Shared handler state

use std::sync::Arc;
use std::time::Instant;

use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::application::{
    AppointmentService, AuthService, CatalogService, NotificationService, SearchService,
    SettingsService, UserAdminService, VehicleService, VehicleTypeService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::PasswordHasher;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::session::SessionStore;

/// Everything a handler may need. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
    pub appointments: Arc<AppointmentService>,
    pub vehicles: Arc<VehicleService>,
    pub vehicle_types: Arc<VehicleTypeService>,
    pub notifications: Arc<NotificationService>,
    pub settings: Arc<SettingsService>,
    pub users: Arc<UserAdminService>,
    pub search: Arc<SearchService>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        sessions: Arc<dyn SessionStore>,
        hasher: PasswordHasher,
        reset_token_ttl: Duration,
    ) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        Self {
            auth: Arc::new(
                AuthService::new(repos.clone(), sessions.clone(), hasher)
                    .with_reset_token_ttl(reset_token_ttl),
            ),
            catalog: Arc::new(CatalogService::new(repos.clone())),
            appointments: Arc::new(AppointmentService::new(repos.clone())),
            vehicles: Arc::new(VehicleService::new(repos.clone())),
            vehicle_types: Arc::new(VehicleTypeService::new(repos.clone())),
            notifications: Arc::new(NotificationService::new(repos.clone())),
            settings: Arc::new(SettingsService::new(repos.clone())),
            users: Arc::new(UserAdminService::new(repos.clone(), sessions)),
            search: Arc::new(SearchService::new(repos)),
            started_at: Arc::new(Instant::now()),
            db,
        }
    }
}
