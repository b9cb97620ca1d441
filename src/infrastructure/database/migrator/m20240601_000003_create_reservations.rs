//! Create reservations table
//!
//! One row per reservation for its whole lifecycle; transitions rewrite the
//! row via a status-conditional update, rows are never deleted.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_vehicles::Vehicles;
use super::m20240601_000002_create_customers::Customers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::VehicleId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::CustomerId).string())
                    .col(ColumnDef::new(Reservations::StartAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Reservations::EndAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("Scheduled"),
                    )
                    .col(ColumnDef::new(Reservations::StartOdometer).big_integer())
                    .col(ColumnDef::new(Reservations::EndOdometer).big_integer())
                    .col(ColumnDef::new(Reservations::Notes).text())
                    .col(ColumnDef::new(Reservations::PaymentMethod).string())
                    .col(ColumnDef::new(Reservations::TotalPrice).big_integer())
                    .col(ColumnDef::new(Reservations::TokenHash).string())
                    .col(ColumnDef::new(Reservations::HandoverSignatureUrl).string())
                    .col(ColumnDef::new(Reservations::ReturnSignatureUrl).string())
                    .col(ColumnDef::new(Reservations::ContractText).text())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_vehicle")
                            .from(Reservations::Table, Reservations::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_customer")
                            .from(Reservations::Table, Reservations::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_vehicle_status")
                    .table(Reservations::Table)
                    .col(Reservations::VehicleId)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_token_hash")
                    .table(Reservations::Table)
                    .col(Reservations::TokenHash)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    VehicleId,
    CustomerId,
    StartAt,
    EndAt,
    Status,
    StartOdometer,
    EndOdometer,
    Notes,
    PaymentMethod,
    TotalPrice,
    TokenHash,
    HandoverSignatureUrl,
    ReturnSignatureUrl,
    ContractText,
    CreatedAt,
    UpdatedAt,
}
