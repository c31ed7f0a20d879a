//! Create services table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Services::Description).text().null())
                    // Price in cents
                    .col(ColumnDef::new(Services::PriceCents).big_integer().not_null())
                    .col(
                        ColumnDef::new(Services::DurationMinutes)
                            .integer()
                            .not_null()
                            .default(60),
                    )
                    .col(ColumnDef::new(Services::Category).string_len(100).null())
                    .col(
                        ColumnDef::new(Services::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Services::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Services {
    Table,
    Id,
    Name,
    Description,
    PriceCents,
    DurationMinutes,
    Category,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
