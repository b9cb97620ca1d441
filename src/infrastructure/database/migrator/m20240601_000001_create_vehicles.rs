//! Create vehicles table
//!
//! Fleet vehicles with the tiered rate schedule and the current odometer
//! reading that handover/return transitions keep monotonic.

use sea_orm_migration::prelude::*;

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
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Name).string().not_null())
                    .col(ColumnDef::new(Vehicles::Plate).string().not_null())
                    .col(
                        ColumnDef::new(Vehicles::Rate4h)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::Rate12h)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::DailyRate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CurrentMileage)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Vehicles::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
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
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_status")
                    .table(Vehicles::Table)
                    .col(Vehicles::Status)
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
    Name,
    Plate,
    Rate4h,
    Rate12h,
    DailyRate,
    CurrentMileage,
    Status,
    CreatedAt,
    UpdatedAt,
}
