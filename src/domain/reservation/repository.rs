//! Reservation repository interface

use async_trait::async_trait;

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Save a new reservation
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    /// Find all reservations (any status)
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// Find reservations that occupy a vehicle's calendar
    /// (status Scheduled or Active)
    async fn find_occupying_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> DomainResult<Vec<Reservation>>;

    /// Resolve a portal capability token by its stored hash
    async fn find_by_token_hash(&self, token_hash: &str) -> DomainResult<Option<Reservation>>;

    /// Atomic conditional write: persist `reservation` only if the stored
    /// row still has status `expected`. Returns `false` when another writer
    /// got there first, so concurrent identical transitions cannot both
    /// succeed.
    async fn update_if_status(
        &self,
        reservation: Reservation,
        expected: ReservationStatus,
    ) -> DomainResult<bool>;
}
