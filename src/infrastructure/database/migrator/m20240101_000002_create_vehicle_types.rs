//! Create vehicle_types table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VehicleTypes::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(VehicleTypes::Description).text().null())
                    .col(
                        ColumnDef::new(VehicleTypes::Icon)
                            .string_len(16)
                            .not_null()
                            .default("🚗"),
                    )
                    .col(
                        ColumnDef::new(VehicleTypes::IsSystem)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(VehicleTypes::CreatedBy).integer().null())
                    .col(
                        ColumnDef::new(VehicleTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_types_created_by")
                            .from(VehicleTypes::Table, VehicleTypes::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum VehicleTypes {
    Table,
    Id,
    Name,
    Description,
    Icon,
    IsSystem,
    CreatedBy,
    CreatedAt,
}
