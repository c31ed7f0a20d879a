//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_vehicle_types;
mod m20240101_000003_create_vehicles;
mod m20240101_000004_create_services;
mod m20240101_000005_create_appointments;
mod m20240101_000006_create_notifications;
mod m20240101_000007_create_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_vehicle_types::Migration),
            Box::new(m20240101_000003_create_vehicles::Migration),
            Box::new(m20240101_000004_create_services::Migration),
            Box::new(m20240101_000005_create_appointments::Migration),
            Box::new(m20240101_000006_create_notifications::Migration),
            Box::new(m20240101_000007_create_settings::Migration),
        ]
    }
}
