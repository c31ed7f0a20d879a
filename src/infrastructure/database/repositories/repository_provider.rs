//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::appointment::AppointmentRepository;
use crate::domain::catalog::ServiceRepository;
use crate::domain::notification::NotificationRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::setting::SettingRepository;
use crate::domain::user::UserRepository;
use crate::domain::vehicle::VehicleRepository;
use crate::domain::vehicle_type::VehicleTypeRepository;

use super::appointment_repository::SeaOrmAppointmentRepository;
use super::notification_repository::SeaOrmNotificationRepository;
use super::service_repository::SeaOrmServiceRepository;
use super::setting_repository::SeaOrmSettingRepository;
use super::user_repository::SeaOrmUserRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;
use super::vehicle_type_repository::SeaOrmVehicleTypeRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let mine = repos.vehicles().list_by_owner(user_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    vehicle_types: SeaOrmVehicleTypeRepository,
    vehicles: SeaOrmVehicleRepository,
    services: SeaOrmServiceRepository,
    appointments: SeaOrmAppointmentRepository,
    notifications: SeaOrmNotificationRepository,
    settings: SeaOrmSettingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            vehicle_types: SeaOrmVehicleTypeRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            services: SeaOrmServiceRepository::new(db.clone()),
            appointments: SeaOrmAppointmentRepository::new(db.clone()),
            notifications: SeaOrmNotificationRepository::new(db.clone()),
            settings: SeaOrmSettingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn vehicle_types(&self) -> &dyn VehicleTypeRepository {
        &self.vehicle_types
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn services(&self) -> &dyn ServiceRepository {
        &self.services
    }

    fn appointments(&self) -> &dyn AppointmentRepository {
        &self.appointments
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.notifications
    }

    fn settings(&self) -> &dyn SettingRepository {
        &self.settings
    }
}
