//! Reservation domain entity and lifecycle state machine
//!
//! All legal transitions live here as methods with pure guards; a guard
//! failure returns before anything is mutated. Persistence, availability
//! checking and pricing are orchestrated by the application service.

use chrono::{DateTime, Utc};

use crate::domain::error::{DomainError, DomainResult, PreconditionReason};
use crate::domain::Interval;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Self-service placeholder: vehicle held, customer/dates deferred
    PendingCustomer,
    /// Fully specified, waiting for handover
    Scheduled,
    /// Vehicle handed over to the renter
    Active,
    /// Vehicle returned, terminal
    Completed,
    /// Called off before handover, terminal
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingCustomer => "PendingCustomer",
            Self::Scheduled => "Scheduled",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "PendingCustomer" => Self::PendingCustomer,
            "Scheduled" => Self::Scheduled,
            "Active" => Self::Active,
            "Completed" => Self::Completed,
            "Cancelled" => Self::Cancelled,
            _ => Self::Cancelled,
        }
    }

    /// Whether a reservation in this status occupies its vehicle's calendar
    pub fn occupies_vehicle(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Active)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the renter settled the bill at return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Transfer => "Transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Cash" => Some(Self::Cash),
            "Card" => Some(Self::Card),
            "Transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle rental reservation
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID
    pub id: String,
    /// Reserved vehicle
    pub vehicle_id: String,
    /// Renter; absent while pending-customer
    pub customer_id: Option<String>,
    /// Rental start; absent while pending-customer
    pub start_at: Option<DateTime<Utc>>,
    /// Rental end; absent while pending-customer
    pub end_at: Option<DateTime<Utc>>,
    /// Current lifecycle status
    pub status: ReservationStatus,
    /// Odometer at handover (km)
    pub start_odometer: Option<i64>,
    /// Odometer at return (km)
    pub end_odometer: Option<i64>,
    /// Free-text notes recorded at return
    pub notes: Option<String>,
    /// Settlement method recorded at return
    pub payment_method: Option<PaymentMethod>,
    /// Computed total price, smallest currency unit
    pub total_price: Option<i64>,
    /// SHA-256 of the portal capability token; present only while a
    /// remote customer completion is outstanding
    pub token_hash: Option<String>,
    /// Renter signature captured at handover
    pub handover_signature_url: Option<String>,
    /// Renter signature captured at return
    pub return_signature_url: Option<String>,
    /// Generated contract text, persisted verbatim
    pub contract_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Staff-created reservation, fully specified immediately.
    pub fn new_scheduled(
        vehicle_id: impl Into<String>,
        customer_id: impl Into<String>,
        interval: Interval,
        total_price: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vehicle_id: vehicle_id.into(),
            customer_id: Some(customer_id.into()),
            start_at: Some(interval.start),
            end_at: Some(interval.end),
            status: ReservationStatus::Scheduled,
            start_odometer: None,
            end_odometer: None,
            notes: None,
            payment_method: None,
            total_price: Some(total_price),
            token_hash: None,
            handover_signature_url: None,
            return_signature_url: None,
            contract_text: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Self-service placeholder: vehicle chosen, customer and dates
    /// deferred until the renter completes the portal flow.
    pub fn new_pending(vehicle_id: impl Into<String>, token_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vehicle_id: vehicle_id.into(),
            customer_id: None,
            start_at: None,
            end_at: None,
            status: ReservationStatus::PendingCustomer,
            start_odometer: None,
            end_odometer: None,
            notes: None,
            payment_method: None,
            total_price: None,
            token_hash: Some(token_hash.into()),
            handover_signature_url: None,
            return_signature_url: None,
            contract_text: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The booked interval, once dates are set.
    pub fn interval(&self) -> Option<Interval> {
        match (self.start_at, self.end_at) {
            (Some(start), Some(end)) => Interval::new(start, end).ok(),
            _ => None,
        }
    }

    /// Attach customer, dates and price to a pending placeholder and
    /// invalidate the capability token.
    pub fn complete_details(
        &mut self,
        customer_id: impl Into<String>,
        interval: Interval,
        total_price: i64,
    ) -> DomainResult<()> {
        if self.status != ReservationStatus::PendingCustomer {
            return Err(DomainError::InvalidTransition {
                event: "completeCustomerDetails",
                from: self.status,
            });
        }
        self.customer_id = Some(customer_id.into());
        self.start_at = Some(interval.start);
        self.end_at = Some(interval.end);
        self.total_price = Some(total_price);
        self.token_hash = None;
        self.status = ReservationStatus::Scheduled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Handover: record starting odometer and signature.
    ///
    /// `vehicle_mileage` is the vehicle's current odometer reading; the
    /// handover reading may never be below it (odometer monotonicity).
    pub fn activate(
        &mut self,
        start_odometer: i64,
        vehicle_mileage: i64,
        signature_url: &str,
    ) -> DomainResult<()> {
        if self.status != ReservationStatus::Scheduled {
            return Err(DomainError::InvalidTransition {
                event: "activate",
                from: self.status,
            });
        }
        if signature_url.trim().is_empty() {
            return Err(DomainError::PreconditionFailed(
                PreconditionReason::SignatureRequired,
            ));
        }
        if start_odometer < vehicle_mileage {
            return Err(DomainError::PreconditionFailed(
                PreconditionReason::OdometerBelowCurrent,
            ));
        }
        self.start_odometer = Some(start_odometer);
        self.handover_signature_url = Some(signature_url.to_string());
        self.status = ReservationStatus::Active;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Return: record ending odometer, notes, payment method and signature.
    pub fn complete(
        &mut self,
        end_odometer: i64,
        notes: Option<String>,
        payment_method: PaymentMethod,
        signature_url: &str,
    ) -> DomainResult<()> {
        if self.status != ReservationStatus::Active {
            return Err(DomainError::InvalidTransition {
                event: "complete",
                from: self.status,
            });
        }
        if signature_url.trim().is_empty() {
            return Err(DomainError::PreconditionFailed(
                PreconditionReason::SignatureRequired,
            ));
        }
        let start = self.start_odometer.unwrap_or(0);
        if end_odometer <= start {
            return Err(DomainError::PreconditionFailed(
                PreconditionReason::OdometerNotAdvanced,
            ));
        }
        self.end_odometer = Some(end_odometer);
        self.notes = notes;
        self.payment_method = Some(payment_method);
        self.return_signature_url = Some(signature_url.to_string());
        self.status = ReservationStatus::Completed;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Call off a reservation before handover, releasing any held token.
    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            ReservationStatus::Scheduled | ReservationStatus::PendingCustomer => {
                self.token_hash = None;
                self.status = ReservationStatus::Cancelled;
                self.updated_at = Utc::now();
                Ok(())
            }
            from => Err(DomainError::InvalidTransition {
                event: "cancel",
                from,
            }),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_interval() -> Interval {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
        Interval::new(start, end).unwrap()
    }

    fn scheduled() -> Reservation {
        Reservation::new_scheduled("veh-1", "cust-1", sample_interval(), 500)
    }

    fn pending() -> Reservation {
        Reservation::new_pending("veh-1", "hash-abc")
    }

    #[test]
    fn staff_created_reservation_is_scheduled() {
        let r = scheduled();
        assert_eq!(r.status, ReservationStatus::Scheduled);
        assert_eq!(r.total_price, Some(500));
        assert!(r.token_hash.is_none());
        assert!(r.interval().is_some());
    }

    #[test]
    fn placeholder_holds_token_and_no_dates() {
        let r = pending();
        assert_eq!(r.status, ReservationStatus::PendingCustomer);
        assert_eq!(r.token_hash.as_deref(), Some("hash-abc"));
        assert!(r.customer_id.is_none());
        assert!(r.interval().is_none());
    }

    #[test]
    fn complete_details_schedules_and_drops_token() {
        let mut r = pending();
        r.complete_details("cust-2", sample_interval(), 900).unwrap();
        assert_eq!(r.status, ReservationStatus::Scheduled);
        assert!(r.token_hash.is_none());
        assert_eq!(r.customer_id.as_deref(), Some("cust-2"));
        assert_eq!(r.total_price, Some(900));
    }

    #[test]
    fn complete_details_only_from_pending() {
        let mut r = scheduled();
        let err = r.complete_details("cust-2", sample_interval(), 900).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        // no mutation on failure
        assert_eq!(r.customer_id.as_deref(), Some("cust-1"));
    }

    #[test]
    fn activate_records_odometer_and_signature() {
        let mut r = scheduled();
        r.activate(10_000, 10_000, "sig://handover.png").unwrap();
        assert_eq!(r.status, ReservationStatus::Active);
        assert_eq!(r.start_odometer, Some(10_000));
        assert!(r.handover_signature_url.is_some());
    }

    #[test]
    fn activate_rejects_pending_placeholder() {
        let mut r = pending();
        let err = r.activate(10_000, 10_000, "sig").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(r.status, ReservationStatus::PendingCustomer);
    }

    #[test]
    fn activate_rejects_odometer_below_current() {
        let mut r = scheduled();
        let err = r.activate(9_999, 10_000, "sig").unwrap_err();
        assert!(matches!(
            err,
            DomainError::PreconditionFailed(PreconditionReason::OdometerBelowCurrent)
        ));
        assert_eq!(r.status, ReservationStatus::Scheduled);
        assert!(r.start_odometer.is_none());
    }

    #[test]
    fn activate_requires_signature() {
        let mut r = scheduled();
        let err = r.activate(10_000, 10_000, "  ").unwrap_err();
        assert!(matches!(
            err,
            DomainError::PreconditionFailed(PreconditionReason::SignatureRequired)
        ));
    }

    #[test]
    fn complete_records_return_data() {
        let mut r = scheduled();
        r.activate(10_000, 10_000, "sig1").unwrap();
        r.complete(10_120, Some("scratch on bumper".into()), PaymentMethod::Cash, "sig2")
            .unwrap();
        assert_eq!(r.status, ReservationStatus::Completed);
        assert_eq!(r.end_odometer, Some(10_120));
        assert_eq!(r.payment_method, Some(PaymentMethod::Cash));
    }

    #[test]
    fn complete_rejects_unmoved_odometer() {
        let mut r = scheduled();
        r.activate(10_000, 10_000, "sig1").unwrap();
        let err = r
            .complete(10_000, None, PaymentMethod::Card, "sig2")
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::PreconditionFailed(PreconditionReason::OdometerNotAdvanced)
        ));
        assert_eq!(r.status, ReservationStatus::Active);
    }

    #[test]
    fn complete_only_from_active() {
        let mut r = scheduled();
        let err = r
            .complete(10_120, None, PaymentMethod::Cash, "sig")
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn cancel_from_scheduled_and_pending() {
        let mut r = scheduled();
        r.cancel().unwrap();
        assert_eq!(r.status, ReservationStatus::Cancelled);

        let mut p = pending();
        p.cancel().unwrap();
        assert_eq!(p.status, ReservationStatus::Cancelled);
        assert!(p.token_hash.is_none(), "cancel must release the token");
    }

    #[test]
    fn cancel_rejects_terminal_and_active_states() {
        let mut r = scheduled();
        r.activate(10_000, 10_000, "sig").unwrap();
        assert!(matches!(
            r.cancel().unwrap_err(),
            DomainError::InvalidTransition { .. }
        ));

        let mut done = scheduled();
        done.cancel().unwrap();
        assert!(matches!(
            done.cancel().unwrap_err(),
            DomainError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn only_scheduled_and_active_occupy_the_vehicle() {
        assert!(ReservationStatus::Scheduled.occupies_vehicle());
        assert!(ReservationStatus::Active.occupies_vehicle());
        assert!(!ReservationStatus::PendingCustomer.occupies_vehicle());
        assert!(!ReservationStatus::Completed.occupies_vehicle());
        assert!(!ReservationStatus::Cancelled.occupies_vehicle());
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            ReservationStatus::PendingCustomer,
            ReservationStatus::Scheduled,
            ReservationStatus::Active,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::from_str(status.as_str()), status);
        }
    }
}
