//! Create vehicles table

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
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::UserId).integer().not_null())
                    .col(ColumnDef::new(Vehicles::Make).string_len(100).not_null())
                    .col(ColumnDef::new(Vehicles::Model).string_len(100).not_null())
                    .col(ColumnDef::new(Vehicles::Year).integer().null())
                    .col(
                        ColumnDef::new(Vehicles::Vin)
                            .string_len(17)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicles::LicensePlate).string_len(20).null())
                    .col(ColumnDef::new(Vehicles::Color).string_len(50).null())
                    .col(ColumnDef::new(Vehicles::EngineType).string_len(50).null())
                    .col(ColumnDef::new(Vehicles::Mileage).integer().null())
                    .col(ColumnDef::new(Vehicles::Notes).text().null())
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_user")
                            .from(Vehicles::Table, Vehicles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_user_id")
                    .table(Vehicles::Table)
                    .col(Vehicles::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    UserId,
    Make,
    Model,
    Year,
    Vin,
    LicensePlate,
    Color,
    EngineType,
    Mileage,
    Notes,
    CreatedAt,
    UpdatedAt,
}
