//! Create appointments table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000003_create_vehicles::Vehicles;
use super::m20240101_000004_create_services::Services;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::UserId).integer().not_null())
                    .col(ColumnDef::new(Appointments::VehicleId).integer().not_null())
                    .col(ColumnDef::new(Appointments::ServiceId).integer().not_null())
                    .col(
                        ColumnDef::new(Appointments::AppointmentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string_len(20)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Appointments::Notes).text().null())
                    .col(ColumnDef::new(Appointments::TechnicianNotes).text().null())
                    // Snapshot of the service price in cents
                    .col(
                        ColumnDef::new(Appointments::TotalPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_user")
                            .from(Appointments::Table, Appointments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_vehicle")
                            .from(Appointments::Table, Appointments::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_service")
                            .from(Appointments::Table, Appointments::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_user_id")
                    .table(Appointments::Table)
                    .col(Appointments::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_date")
                    .table(Appointments::Table)
                    .col(Appointments::AppointmentDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Appointments {
    Table,
    Id,
    UserId,
    VehicleId,
    ServiceId,
    AppointmentDate,
    Status,
    Notes,
    TechnicianNotes,
    TotalPriceCents,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}
