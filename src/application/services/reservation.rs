//! Reservation lifecycle business logic
//!
//! Orchestrates the domain state machine against the persistence boundary.
//! Two rules keep double-booking out:
//!
//! 1. The availability check followed by the insert/update runs under a
//!    per-vehicle async lock, so check-then-write on one vehicle's interval
//!    set is a single atomic unit.
//! 2. Every status transition is persisted with a compare-and-set
//!    (`update_if_status`), so two concurrent identical transitions can
//!    never both succeed even across processes.
//!
//! The service performs no retries; a failed step reverts what it already
//! wrote and surfaces the error to the caller.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{
    availability, portal, pricing, DomainError, DomainResult, FileStore, IncomeRecord, Interval,
    PaymentMethod, PreconditionReason, Reservation, ReservationStatus, RepositoryProvider,
    Vehicle, VehicleStatus,
};

/// Service for reservation lifecycle operations.
///
/// Shared by the internal staff flow and both portal flows so the pricing,
/// availability and transition logic exists exactly once.
pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    files: Arc<dyn FileStore>,
    vehicle_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, files: Arc<dyn FileStore>) -> Self {
        Self {
            repos,
            files,
            vehicle_locks: DashMap::new(),
        }
    }

    fn vehicle_lock(&self, vehicle_id: &str) -> Arc<Mutex<()>> {
        self.vehicle_locks
            .entry(vehicle_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn require_vehicle(&self, vehicle_id: &str) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle_id.to_string(),
            })
    }

    async fn require_reservation(&self, id: &str) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })
    }

    /// Re-read a reservation to report which status actually blocked `event`.
    async fn lost_transition(&self, id: &str, event: &'static str) -> DomainError {
        match self.repos.reservations().find_by_id(id).await {
            Ok(Some(current)) => DomainError::InvalidTransition {
                event,
                from: current.status,
            },
            _ => DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            },
        }
    }

    /// All vehicles free for `interval` (not in maintenance, zero conflicts).
    pub async fn available_vehicles(&self, interval: Interval) -> DomainResult<Vec<Vehicle>> {
        let vehicles = self.repos.vehicles().find_all().await?;
        let reservations = self.repos.reservations().find_all().await?;
        Ok(availability::available_vehicles(
            &interval,
            &reservations,
            &vehicles,
        ))
    }

    /// Staff booking: fully specified reservation, priced and scheduled.
    pub async fn create_full(
        &self,
        customer_id: &str,
        vehicle_id: &str,
        interval: Interval,
    ) -> DomainResult<Reservation> {
        if self
            .repos
            .customers()
            .find_by_id(customer_id)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: customer_id.to_string(),
            });
        }

        let lock = self.vehicle_lock(vehicle_id);
        let _guard = lock.lock().await;

        let vehicle = self.require_vehicle(vehicle_id).await?;
        self.ensure_free(&vehicle, &interval).await?;

        let total = pricing::price(&vehicle.rates, &interval)?;
        let reservation = Reservation::new_scheduled(vehicle_id, customer_id, interval, total);
        self.repos.reservations().save(reservation.clone()).await?;

        info!(
            reservation_id = %reservation.id,
            vehicle_id,
            total,
            "Reservation scheduled"
        );
        Ok(reservation)
    }

    /// Self-service placeholder: holds the vehicle choice and a freshly
    /// issued capability token; customer and dates come later through the
    /// portal. Returns the raw token — it is never stored and never shown
    /// again.
    pub async fn create_pending(&self, vehicle_id: &str) -> DomainResult<(Reservation, String)> {
        let vehicle = self.require_vehicle(vehicle_id).await?;
        if !vehicle.is_bookable() {
            return Err(DomainError::PreconditionFailed(
                PreconditionReason::VehicleUnavailable,
            ));
        }

        let issued = portal::issue_token();
        let reservation = Reservation::new_pending(vehicle_id, issued.token_hash);
        self.repos.reservations().save(reservation.clone()).await?;

        info!(reservation_id = %reservation.id, vehicle_id, "Pending reservation created");
        Ok((reservation, issued.token))
    }

    /// Resolve a raw portal token to its pending reservation.
    pub async fn resolve_token(&self, token: &str) -> DomainResult<Reservation> {
        let hash = portal::hash_token(token);
        self.repos
            .reservations()
            .find_by_token_hash(&hash)
            .await?
            .filter(|r| r.status == ReservationStatus::PendingCustomer)
            .ok_or(DomainError::NotFound {
                entity: "Reservation",
                field: "token",
                value: "<portal token>".to_string(),
            })
    }

    /// Portal completion: attach customer and dates to the pending
    /// reservation the token resolves to, price it, and consume the token.
    pub async fn complete_details(
        &self,
        token: &str,
        customer_id: &str,
        interval: Interval,
    ) -> DomainResult<Reservation> {
        let mut reservation = self.resolve_token(token).await?;
        let vehicle_id = reservation.vehicle_id.clone();

        let lock = self.vehicle_lock(&vehicle_id);
        let _guard = lock.lock().await;

        let vehicle = self.require_vehicle(&vehicle_id).await?;
        self.ensure_free(&vehicle, &interval).await?;

        let total = pricing::price(&vehicle.rates, &interval)?;
        reservation.complete_details(customer_id, interval, total)?;

        let applied = self
            .repos
            .reservations()
            .update_if_status(reservation.clone(), ReservationStatus::PendingCustomer)
            .await?;
        if !applied {
            // Token was consumed or the placeholder cancelled concurrently
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "token",
                value: "<portal token>".to_string(),
            });
        }

        info!(reservation_id = %reservation.id, vehicle_id, "Portal booking completed");
        Ok(reservation)
    }

    /// Handover: record starting odometer and the renter's signature, mark
    /// the vehicle rented.
    pub async fn activate(
        &self,
        id: &str,
        start_odometer: i64,
        signature_png: &[u8],
    ) -> DomainResult<Reservation> {
        if signature_png.is_empty() {
            return Err(DomainError::PreconditionFailed(
                PreconditionReason::SignatureRequired,
            ));
        }

        let mut reservation = self.require_reservation(id).await?;
        let vehicle_id = reservation.vehicle_id.clone();

        let lock = self.vehicle_lock(&vehicle_id);
        let _guard = lock.lock().await;

        let vehicle = self.require_vehicle(&vehicle_id).await?;

        // Upload first: an orphaned image on a failed transition is harmless,
        // a transition pointing at a missing image is not.
        let signature_url = self
            .files
            .upload(&format!("signatures/{}/handover.png", id), signature_png)
            .await?;

        let snapshot = reservation.clone();
        reservation.activate(start_odometer, vehicle.current_mileage, &signature_url)?;

        let applied = self
            .repos
            .reservations()
            .update_if_status(reservation.clone(), ReservationStatus::Scheduled)
            .await?;
        if !applied {
            return Err(self.lost_transition(id, "activate").await);
        }

        if let Err(e) = self
            .repos
            .vehicles()
            .set_status(&vehicle_id, VehicleStatus::Rented)
            .await
        {
            // Roll the reservation back so no half-updated state survives
            self.revert_reservation(id, &snapshot, ReservationStatus::Active)
                .await;
            return Err(e);
        }

        info!(reservation_id = %id, vehicle_id, start_odometer, "Rental activated");
        Ok(reservation)
    }

    /// Return: record ending odometer, notes, payment method and signature;
    /// release the vehicle, advance its odometer, book the income.
    pub async fn complete(
        &self,
        id: &str,
        end_odometer: i64,
        notes: Option<String>,
        payment_method: PaymentMethod,
        signature_png: &[u8],
    ) -> DomainResult<Reservation> {
        if signature_png.is_empty() {
            return Err(DomainError::PreconditionFailed(
                PreconditionReason::SignatureRequired,
            ));
        }

        let mut reservation = self.require_reservation(id).await?;
        let vehicle_id = reservation.vehicle_id.clone();

        let lock = self.vehicle_lock(&vehicle_id);
        let _guard = lock.lock().await;

        let vehicle = self.require_vehicle(&vehicle_id).await?;

        let signature_url = self
            .files
            .upload(&format!("signatures/{}/return.png", id), signature_png)
            .await?;

        let snapshot = reservation.clone();
        reservation.complete(end_odometer, notes, payment_method, &signature_url)?;

        let applied = self
            .repos
            .reservations()
            .update_if_status(reservation.clone(), ReservationStatus::Active)
            .await?;
        if !applied {
            return Err(self.lost_transition(id, "complete").await);
        }

        if let Err(e) = self.release_vehicle(&vehicle_id, end_odometer).await {
            self.revert_reservation(id, &snapshot, ReservationStatus::Completed)
                .await;
            return Err(e);
        }

        let amount = reservation.total_price.unwrap_or(0);
        let income = IncomeRecord::new(
            amount,
            Utc::now(),
            format!("Rental income: {} ({})", vehicle.name, vehicle.plate),
            id,
        );
        if let Err(e) = self.repos.ledger().record_income(income).await {
            self.restore_vehicle(&vehicle, end_odometer).await;
            self.revert_reservation(id, &snapshot, ReservationStatus::Completed)
                .await;
            return Err(e);
        }

        info!(
            reservation_id = %id,
            vehicle_id,
            end_odometer,
            amount,
            "Rental completed"
        );
        Ok(reservation)
    }

    /// Call off a scheduled reservation or a pending placeholder.
    pub async fn cancel(&self, id: &str) -> DomainResult<Reservation> {
        let mut reservation = self.require_reservation(id).await?;
        let previous = reservation.status;
        reservation.cancel()?;

        let applied = self
            .repos
            .reservations()
            .update_if_status(reservation.clone(), previous)
            .await?;
        if !applied {
            return Err(self.lost_transition(id, "cancel").await);
        }

        info!(reservation_id = %id, "Reservation cancelled");
        Ok(reservation)
    }

    // ── Helpers ────────────────────────────────────────────────

    /// Availability check for one vehicle; caller holds the vehicle lock.
    async fn ensure_free(&self, vehicle: &Vehicle, interval: &Interval) -> DomainResult<()> {
        if vehicle.status == VehicleStatus::Maintenance {
            return Err(DomainError::PreconditionFailed(
                PreconditionReason::VehicleUnavailable,
            ));
        }
        let existing = self
            .repos
            .reservations()
            .find_occupying_for_vehicle(&vehicle.id)
            .await?;
        if existing.iter().any(|r| availability::conflicts(r, interval)) {
            return Err(DomainError::IntervalConflict {
                vehicle_id: vehicle.id.clone(),
            });
        }
        Ok(())
    }

    async fn release_vehicle(&self, vehicle_id: &str, end_odometer: i64) -> DomainResult<()> {
        self.repos
            .vehicles()
            .set_status(vehicle_id, VehicleStatus::Available)
            .await?;
        self.repos
            .vehicles()
            .set_current_mileage(vehicle_id, end_odometer)
            .await
    }

    /// Compensation: write the pre-transition snapshot back, conditioned on
    /// the status this operation just wrote.
    async fn revert_reservation(
        &self,
        id: &str,
        snapshot: &Reservation,
        written: ReservationStatus,
    ) {
        if let Err(e) = self
            .repos
            .reservations()
            .update_if_status(snapshot.clone(), written)
            .await
        {
            warn!(reservation_id = %id, "Rollback of reservation failed: {}", e);
        }
    }

    /// Compensation: restore vehicle status/mileage after a ledger failure.
    async fn restore_vehicle(&self, vehicle: &Vehicle, written_mileage: i64) {
        let result = async {
            self.repos
                .vehicles()
                .set_status(&vehicle.id, vehicle.status)
                .await?;
            self.repos
                .vehicles()
                .set_current_mileage(&vehicle.id, vehicle.current_mileage)
                .await
        }
        .await;
        if let Err(e) = result {
            warn!(
                vehicle_id = %vehicle.id,
                written_mileage,
                "Rollback of vehicle state failed: {}",
                e
            );
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    use crate::domain::{Customer, RateSchedule};
    use crate::infrastructure::files::InMemoryFileStore;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    struct Fixture {
        repos: Arc<InMemoryRepositoryProvider>,
        service: Arc<ReservationService>,
        vehicle_id: String,
        customer_id: String,
    }

    async fn fixture() -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let files = Arc::new(InMemoryFileStore::new());
        let service = Arc::new(ReservationService::new(repos.clone(), files));

        let vehicle = Vehicle::new(
            "Kia Sonet",
            "01 A 777 AA",
            RateSchedule {
                rate_4h: 500,
                rate_12h: 900,
                daily_rate: 1200,
            },
            10_000,
        );
        let vehicle_id = vehicle.id.clone();
        repos.vehicles().save(vehicle).await.unwrap();

        let customer = Customer::new("Renter", "+998900000000", None, "AF0000001", None);
        let customer_id = customer.id.clone();
        repos.customers().save(customer).await.unwrap();

        Fixture {
            repos,
            service,
            vehicle_id,
            customer_id,
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn iv(start: u32, end: u32) -> Interval {
        Interval::new(at(start), at(end)).unwrap()
    }

    #[tokio::test]
    async fn full_lifecycle_end_to_end() {
        let fx = fixture().await;

        // 09:00–13:00 hits the four-hour tier
        let r = fx
            .service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();
        assert_eq!(r.status, ReservationStatus::Scheduled);
        assert_eq!(r.total_price, Some(500));

        let r = fx.service.activate(&r.id, 10_000, b"sig").await.unwrap();
        assert_eq!(r.status, ReservationStatus::Active);
        let vehicle = fx.repos.vehicles().find_by_id(&fx.vehicle_id).await.unwrap().unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Rented);

        let r = fx
            .service
            .complete(&r.id, 10_120, None, PaymentMethod::Cash, b"sig")
            .await
            .unwrap();
        assert_eq!(r.status, ReservationStatus::Completed);
        assert_eq!(r.end_odometer, Some(10_120));

        let vehicle = fx.repos.vehicles().find_by_id(&fx.vehicle_id).await.unwrap().unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(vehicle.current_mileage, 10_120);

        let income = fx.repos.ledger().find_all().await.unwrap();
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].amount, 500);
        assert_eq!(income[0].reservation_id, r.id);
    }

    #[tokio::test]
    async fn overlapping_create_is_rejected_non_overlapping_succeeds() {
        let fx = fixture().await;
        fx.service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();

        let err = fx
            .service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(12, 15))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::IntervalConflict { .. }));

        // back-to-back is fine
        fx.service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(13, 15))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn concurrent_creates_exactly_one_wins() {
        let fx = fixture().await;

        let a = {
            let svc = fx.service.clone();
            let (c, v) = (fx.customer_id.clone(), fx.vehicle_id.clone());
            tokio::spawn(async move { svc.create_full(&c, &v, iv(9, 13)).await })
        };
        let b = {
            let svc = fx.service.clone();
            let (c, v) = (fx.customer_id.clone(), fx.vehicle_id.clone());
            tokio::spawn(async move { svc.create_full(&c, &v, iv(12, 15)).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "exactly one of two overlapping creates may win");
        let loser = if a.is_err() { a } else { b };
        assert!(matches!(
            loser.unwrap_err(),
            DomainError::IntervalConflict { .. }
        ));
    }

    #[tokio::test]
    async fn concurrent_activations_exactly_one_wins() {
        let fx = fixture().await;
        let r = fx
            .service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();

        let a = {
            let svc = fx.service.clone();
            let id = r.id.clone();
            tokio::spawn(async move { svc.activate(&id, 10_000, b"sig-a").await })
        };
        let b = {
            let svc = fx.service.clone();
            let id = r.id.clone();
            tokio::spawn(async move { svc.activate(&id, 10_000, b"sig-b").await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!([&a, &b].iter().filter(|r| r.is_ok()).count(), 1);
        let loser = if a.is_err() { a } else { b };
        assert!(matches!(
            loser.unwrap_err(),
            DomainError::InvalidTransition { .. }
        ));
    }

    #[tokio::test]
    async fn activate_rejects_odometer_below_current_without_side_effects() {
        let fx = fixture().await;
        let r = fx
            .service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();

        let err = fx.service.activate(&r.id, 9_999, b"sig").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::PreconditionFailed(PreconditionReason::OdometerBelowCurrent)
        ));

        let stored = fx.repos.reservations().find_by_id(&r.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Scheduled);
        let vehicle = fx.repos.vehicles().find_by_id(&fx.vehicle_id).await.unwrap().unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Available);
    }

    #[tokio::test]
    async fn activate_requires_signature_bytes() {
        let fx = fixture().await;
        let r = fx
            .service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();
        let err = fx.service.activate(&r.id, 10_000, b"").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::PreconditionFailed(PreconditionReason::SignatureRequired)
        ));
    }

    #[tokio::test]
    async fn complete_rejects_unmoved_odometer() {
        let fx = fixture().await;
        let r = fx
            .service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();
        fx.service.activate(&r.id, 10_000, b"sig").await.unwrap();

        let err = fx
            .service
            .complete(&r.id, 10_000, None, PaymentMethod::Card, b"sig")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::PreconditionFailed(PreconditionReason::OdometerNotAdvanced)
        ));
        // still rented, nothing booked
        let vehicle = fx.repos.vehicles().find_by_id(&fx.vehicle_id).await.unwrap().unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Rented);
        assert!(fx.repos.ledger().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pending_flow_token_is_single_use() {
        let fx = fixture().await;
        let (pending, token) = fx.service.create_pending(&fx.vehicle_id).await.unwrap();
        assert_eq!(pending.status, ReservationStatus::PendingCustomer);

        // token resolves while pending
        let seen = fx.service.resolve_token(&token).await.unwrap();
        assert_eq!(seen.id, pending.id);

        let r = fx
            .service
            .complete_details(&token, &fx.customer_id, iv(9, 18))
            .await
            .unwrap();
        assert_eq!(r.status, ReservationStatus::Scheduled);
        assert_eq!(r.total_price, Some(900)); // nine hours, twelve-hour tier

        // replay fails
        assert!(matches!(
            fx.service.resolve_token(&token).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            fx.service
                .complete_details(&token, &fx.customer_id, iv(9, 18))
                .await
                .unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn cancelling_pending_reservation_kills_the_token() {
        let fx = fixture().await;
        let (pending, token) = fx.service.create_pending(&fx.vehicle_id).await.unwrap();

        fx.service.cancel(&pending.id).await.unwrap();

        assert!(matches!(
            fx.service.resolve_token(&token).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn activate_rejects_pending_placeholder() {
        let fx = fixture().await;
        let (pending, _) = fx.service.create_pending(&fx.vehicle_id).await.unwrap();

        let err = fx.service.activate(&pending.id, 10_000, b"sig").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn pending_placeholder_does_not_block_the_calendar() {
        let fx = fixture().await;
        fx.service.create_pending(&fx.vehicle_id).await.unwrap();

        // staff can still book any interval
        fx.service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn available_vehicles_respects_interval_and_maintenance() {
        let fx = fixture().await;
        let mut workshop = Vehicle::new(
            "Lada Vesta",
            "01 B 111 BB",
            RateSchedule {
                rate_4h: 300,
                rate_12h: 500,
                daily_rate: 700,
            },
            5_000,
        );
        workshop.status = VehicleStatus::Maintenance;
        fx.repos.vehicles().save(workshop).await.unwrap();

        fx.service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();

        let free = fx.service.available_vehicles(iv(10, 12)).await.unwrap();
        assert!(free.is_empty());

        let free = fx.service.available_vehicles(iv(13, 15)).await.unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, fx.vehicle_id);
    }

    #[tokio::test]
    async fn create_pending_rejects_non_available_vehicle() {
        let fx = fixture().await;
        fx.repos
            .vehicles()
            .set_status(&fx.vehicle_id, VehicleStatus::Maintenance)
            .await
            .unwrap();

        let err = fx.service.create_pending(&fx.vehicle_id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::PreconditionFailed(PreconditionReason::VehicleUnavailable)
        ));
    }

    #[tokio::test]
    async fn cancel_is_rejected_after_completion() {
        let fx = fixture().await;
        let r = fx
            .service
            .create_full(&fx.customer_id, &fx.vehicle_id, iv(9, 13))
            .await
            .unwrap();
        fx.service.activate(&r.id, 10_000, b"sig").await.unwrap();
        fx.service
            .complete(&r.id, 10_050, None, PaymentMethod::Transfer, b"sig")
            .await
            .unwrap();

        let err = fx.service.cancel(&r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }
}
