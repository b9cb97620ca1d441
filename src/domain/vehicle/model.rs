//! Vehicle domain entity

use chrono::{DateTime, Utc};

/// Vehicle fleet status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    /// Parked and bookable
    Available,
    /// Handed over to a renter
    Rented,
    /// In the workshop, never offered for booking
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Rented => "Rented",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Available" => Self::Available,
            "Rented" => Self::Rented,
            "Maintenance" => Self::Maintenance,
            _ => Self::Maintenance,
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tiered rate schedule, amounts in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSchedule {
    /// Flat price for rentals up to four hours
    pub rate_4h: i64,
    /// Flat price for rentals up to twelve hours
    pub rate_12h: i64,
    /// Price per started day beyond twelve hours
    pub daily_rate: i64,
}

/// Fleet vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Unique vehicle ID
    pub id: String,
    /// Display name (make/model)
    pub name: String,
    /// License plate
    pub plate: String,
    /// Tiered pricing for this vehicle
    pub rates: RateSchedule,
    /// Current odometer reading in kilometers.
    /// Monotonically non-decreasing; advanced only at rental return.
    pub current_mileage: i64,
    /// Current fleet status
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        name: impl Into<String>,
        plate: impl Into<String>,
        rates: RateSchedule,
        current_mileage: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            plate: plate.into(),
            rates,
            current_mileage,
            status: VehicleStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the vehicle can be offered for a new booking right now
    pub fn is_bookable(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> Vehicle {
        Vehicle::new(
            "Kia Sonet",
            "01 A 777 AA",
            RateSchedule {
                rate_4h: 500,
                rate_12h: 900,
                daily_rate: 1200,
            },
            10_000,
        )
    }

    #[test]
    fn new_vehicle_is_available() {
        let v = sample_vehicle();
        assert_eq!(v.status, VehicleStatus::Available);
        assert!(v.is_bookable());
        assert_eq!(v.current_mileage, 10_000);
    }

    #[test]
    fn rented_vehicle_is_not_bookable() {
        let mut v = sample_vehicle();
        v.status = VehicleStatus::Rented;
        assert!(!v.is_bookable());
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            VehicleStatus::Available,
            VehicleStatus::Rented,
            VehicleStatus::Maintenance,
        ] {
            assert_eq!(VehicleStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_maintenance() {
        // A vehicle with a corrupt status row must never be offered for booking
        assert_eq!(VehicleStatus::from_str("???"), VehicleStatus::Maintenance);
    }
}
