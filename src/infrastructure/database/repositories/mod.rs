//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod customer_repository;
pub mod ledger_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

/// Map a SeaORM error to the domain's transient upstream failure.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Upstream(format!("Database error: {}", e))
}
