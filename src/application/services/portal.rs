//! Self-service portal flow
//!
//! Token-gated booking for anonymous renters: staff (or the online form)
//! create a placeholder holding a vehicle and a capability token; the
//! renter later opens the link, registers themselves and picks dates.
//! Everything funnels into the same `ReservationService` the staff flow
//! uses, so the three booking surfaces cannot drift apart.

use std::sync::Arc;

use crate::application::services::customer::{CustomerService, NewCustomer};
use crate::application::services::reservation::ReservationService;
use crate::domain::{DomainResult, Interval, Reservation};

/// Outcome of starting a portal booking; `token` is shown exactly once.
#[derive(Debug, Clone)]
pub struct PortalBooking {
    pub reservation: Reservation,
    pub token: String,
}

pub struct PortalService {
    reservations: Arc<ReservationService>,
    customers: Arc<CustomerService>,
}

impl PortalService {
    pub fn new(reservations: Arc<ReservationService>, customers: Arc<CustomerService>) -> Self {
        Self {
            reservations,
            customers,
        }
    }

    /// Hold a vehicle and issue the capability token for the renter link.
    pub async fn start_booking(&self, vehicle_id: &str) -> DomainResult<PortalBooking> {
        let (reservation, token) = self.reservations.create_pending(vehicle_id).await?;
        Ok(PortalBooking { reservation, token })
    }

    /// What the bearer of `token` is allowed to see.
    pub async fn view(&self, token: &str) -> DomainResult<Reservation> {
        self.reservations.resolve_token(token).await
    }

    /// Renter self-registration plus booking completion, consuming the token.
    pub async fn complete_booking(
        &self,
        token: &str,
        renter: NewCustomer,
        interval: Interval,
    ) -> DomainResult<Reservation> {
        // Resolve before creating the customer row so a dead token does not
        // leave an orphaned registration behind.
        self.reservations.resolve_token(token).await?;

        let customer = self.customers.register(renter).await?;
        self.reservations
            .complete_details(token, &customer.id, interval)
            .await
    }
}
