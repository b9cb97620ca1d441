//! Create income_records table

use sea_orm_migration::prelude::*;

use super::m20240601_000003_create_reservations::Reservations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IncomeRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IncomeRecords::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IncomeRecords::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncomeRecords::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncomeRecords::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncomeRecords::ReservationId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_records_reservation")
                            .from(IncomeRecords::Table, IncomeRecords::ReservationId)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_income_records_date")
                    .table(IncomeRecords::Table)
                    .col(IncomeRecords::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IncomeRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum IncomeRecords {
    Table,
    Id,
    Amount,
    Date,
    Description,
    ReservationId,
}
