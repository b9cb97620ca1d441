//! Interval-based vehicle availability
//!
//! A vehicle is free for a candidate interval iff it is not in maintenance
//! and no Scheduled/Active reservation for it overlaps the interval.
//! Pending placeholders hold no dates and never block the calendar;
//! cancelled and completed reservations release theirs.

use super::reservation::Reservation;
use super::vehicle::{Vehicle, VehicleStatus};
use super::Interval;

/// Whether `reservation` blocks `candidate` on its vehicle's calendar.
pub fn conflicts(reservation: &Reservation, candidate: &Interval) -> bool {
    if !reservation.status.occupies_vehicle() {
        return false;
    }
    match reservation.interval() {
        Some(existing) => existing.overlaps(candidate),
        None => false,
    }
}

/// Whether `vehicle` is free for `candidate` given all its reservations.
///
/// `reservations` may contain rows for other vehicles; they are skipped.
pub fn vehicle_is_free(
    vehicle: &Vehicle,
    candidate: &Interval,
    reservations: &[Reservation],
) -> bool {
    if vehicle.status == VehicleStatus::Maintenance {
        return false;
    }
    !reservations
        .iter()
        .filter(|r| r.vehicle_id == vehicle.id)
        .any(|r| conflicts(r, candidate))
}

/// All vehicles free for `candidate`, given the full reservation set.
pub fn available_vehicles(
    candidate: &Interval,
    reservations: &[Reservation],
    vehicles: &[Vehicle],
) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|v| vehicle_is_free(v, candidate, reservations))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::RateSchedule;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn iv(start: u32, end: u32) -> Interval {
        Interval::new(at(start), at(end)).unwrap()
    }

    fn vehicle(id: &str, status: VehicleStatus) -> Vehicle {
        let mut v = Vehicle::new(
            id,
            "PLATE",
            RateSchedule {
                rate_4h: 500,
                rate_12h: 900,
                daily_rate: 1200,
            },
            0,
        );
        v.id = id.to_string();
        v.status = status;
        v
    }

    fn booked(vehicle_id: &str, interval: Interval) -> Reservation {
        Reservation::new_scheduled(vehicle_id, "cust", interval, 500)
    }

    #[test]
    fn no_reservations_returns_all_non_maintenance_vehicles() {
        let vehicles = vec![
            vehicle("a", VehicleStatus::Available),
            vehicle("b", VehicleStatus::Rented),
            vehicle("c", VehicleStatus::Maintenance),
        ];
        let free = available_vehicles(&iv(9, 13), &[], &vehicles);
        let ids: Vec<&str> = free.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn overlapping_scheduled_reservation_blocks_vehicle() {
        let vehicles = vec![vehicle("a", VehicleStatus::Available)];
        let existing = vec![booked("a", iv(9, 13))];
        assert!(available_vehicles(&iv(12, 15), &existing, &vehicles).is_empty());
    }

    #[test]
    fn back_to_back_booking_does_not_block() {
        let vehicles = vec![vehicle("a", VehicleStatus::Available)];
        let existing = vec![booked("a", iv(9, 12))];
        let free = available_vehicles(&iv(12, 15), &existing, &vehicles);
        assert_eq!(free.len(), 1);
    }

    #[test]
    fn cancelled_and_completed_release_the_calendar() {
        let vehicles = vec![vehicle("a", VehicleStatus::Available)];
        let mut cancelled = booked("a", iv(9, 13));
        cancelled.cancel().unwrap();
        let mut completed = booked("a", iv(9, 13));
        completed.activate(0, 0, "sig").unwrap();
        completed
            .complete(1, None, crate::domain::reservation::PaymentMethod::Cash, "sig")
            .unwrap();

        let existing = vec![cancelled, completed];
        assert_eq!(available_vehicles(&iv(10, 12), &existing, &vehicles).len(), 1);
    }

    #[test]
    fn pending_placeholder_never_blocks() {
        let vehicles = vec![vehicle("a", VehicleStatus::Available)];
        let pending = Reservation::new_pending("a", "hash");
        assert!(vehicle_is_free(&vehicles[0], &iv(9, 13), &[pending]));
    }

    #[test]
    fn other_vehicles_reservations_are_ignored() {
        let vehicles = vec![vehicle("a", VehicleStatus::Available)];
        let existing = vec![booked("b", iv(9, 13))];
        assert!(vehicle_is_free(&vehicles[0], &iv(9, 13), &existing));
    }
}
