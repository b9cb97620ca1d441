//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::customer::CustomerRepository;
use crate::domain::ledger::LedgerRepository;
use crate::domain::reservation::ReservationRepository;
use crate::domain::vehicle::VehicleRepository;
use crate::domain::RepositoryProvider;

use super::customer_repository::SeaOrmCustomerRepository;
use super::ledger_repository::SeaOrmLedgerRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let vehicle = repos.vehicles().find_by_id("...").await?;
/// let open = repos.reservations().find_occupying_for_vehicle("...").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmVehicleRepository,
    customers: SeaOrmCustomerRepository,
    reservations: SeaOrmReservationRepository,
    ledger: SeaOrmLedgerRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            customers: SeaOrmCustomerRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            ledger: SeaOrmLedgerRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn ledger(&self) -> &dyn LedgerRepository {
        &self.ledger
    }
}
