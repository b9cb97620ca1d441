//! Core business entities, the reservation state machine, pricing,
//! availability, portal tokens and the repository/collaborator ports.
//! Pure logic only; all I/O lives behind traits.

pub mod availability;
pub mod customer;
pub mod error;
pub mod interval;
pub mod ledger;
pub mod portal;
pub mod ports;
pub mod pricing;
pub mod reservation;
pub mod vehicle;

// Re-export commonly used types
pub use customer::{Customer, CustomerRepository};
pub use error::{DomainError, DomainResult, PreconditionReason};
pub use interval::Interval;
pub use ledger::{IncomeRecord, LedgerRepository};
pub use ports::{ContractGenerator, ContractSnapshot, FileStore};
pub use reservation::{PaymentMethod, Reservation, ReservationRepository, ReservationStatus};
pub use vehicle::{RateSchedule, Vehicle, VehicleRepository, VehicleStatus};

/// Access to all repositories behind one injection point.
/// See: `SeaOrmRepositoryProvider` (SQL) and `InMemoryRepositoryProvider`
/// (dev/tests) in `infrastructure/`.
pub trait RepositoryProvider: Send + Sync {
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn customers(&self) -> &dyn CustomerRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn ledger(&self) -> &dyn LedgerRepository;
}
