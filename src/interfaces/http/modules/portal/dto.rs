//! Portal DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::NewCustomer;
use crate::interfaces::http::modules::reservations::ReservationDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartBookingRequest {
    #[validate(length(min = 1, message = "vehicle_id is required"))]
    pub vehicle_id: String,
}

/// The raw token is shown exactly once, in this response; only its hash
/// is kept server-side.
#[derive(Debug, Serialize, ToSchema)]
pub struct StartBookingResponse {
    pub reservation: ReservationDto,
    pub token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteBookingRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 30, message = "phone is required"))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50, message = "license number is required"))]
    pub license_number: String,
    /// Rental start, inclusive
    pub start: DateTime<Utc>,
    /// Rental end, exclusive
    pub end: DateTime<Utc>,
}

impl CompleteBookingRequest {
    pub fn renter(&self) -> NewCustomer {
        NewCustomer {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            license_number: self.license_number.clone(),
            license_image: None,
        }
    }
}
