//! Vehicle DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{RateSchedule, Vehicle};

/// Vehicle as exposed over the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    pub id: String,
    pub name: String,
    pub plate: String,
    /// Flat price for rentals up to 4 hours, smallest currency unit
    pub rate_4h: i64,
    /// Flat price for rentals up to 12 hours
    pub rate_12h: i64,
    /// Per-day price beyond 12 hours
    pub daily_rate: i64,
    pub current_mileage: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.name,
            plate: v.plate,
            rate_4h: v.rates.rate_4h,
            rate_12h: v.rates.rate_12h,
            daily_rate: v.rates.daily_rate,
            current_mileage: v.current_mileage,
            status: v.status.to_string(),
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100, message = "vehicle name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "plate is required"))]
    pub plate: String,
    #[validate(range(min = 0))]
    pub rate_4h: i64,
    #[validate(range(min = 0))]
    pub rate_12h: i64,
    #[validate(range(min = 0))]
    pub daily_rate: i64,
    #[validate(range(min = 0))]
    pub current_mileage: i64,
}

impl CreateVehicleRequest {
    pub fn rates(&self) -> RateSchedule {
        RateSchedule {
            rate_4h: self.rate_4h,
            rate_12h: self.rate_12h,
            daily_rate: self.daily_rate,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetVehicleStatusRequest {
    /// One of: Available, Rented, Maintenance
    #[validate(length(min = 1))]
    pub status: String,
}

/// Availability window, ISO 8601 timestamps, half-open `[start, end)`
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
