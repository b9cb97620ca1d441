//! Reservation DTOs

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{DomainError, DomainResult, PaymentMethod, Reservation};

/// Reservation as exposed over the API. The capability-token hash is
/// internal and never serialized.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: String,
    pub vehicle_id: String,
    pub customer_id: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub status: String,
    pub start_odometer: Option<i64>,
    pub end_odometer: Option<i64>,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    /// Smallest currency unit
    pub total_price: Option<i64>,
    pub handover_signature_url: Option<String>,
    pub return_signature_url: Option<String>,
    pub contract_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            vehicle_id: r.vehicle_id,
            customer_id: r.customer_id,
            start_at: r.start_at,
            end_at: r.end_at,
            status: r.status.to_string(),
            start_odometer: r.start_odometer,
            end_odometer: r.end_odometer,
            notes: r.notes,
            payment_method: r.payment_method.map(|m| m.as_str().to_string()),
            total_price: r.total_price,
            handover_signature_url: r.handover_signature_url,
            return_signature_url: r.return_signature_url,
            contract_text: r.contract_text,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1, message = "customer_id is required"))]
    pub customer_id: String,
    #[validate(length(min = 1, message = "vehicle_id is required"))]
    pub vehicle_id: String,
    /// Rental start, inclusive
    pub start: DateTime<Utc>,
    /// Rental end, exclusive
    pub end: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActivateReservationRequest {
    #[validate(range(min = 0))]
    pub start_odometer: i64,
    /// Base64-encoded renter signature PNG
    #[validate(length(min = 1, message = "signature is required"))]
    pub signature_base64: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteReservationRequest {
    #[validate(range(min = 0))]
    pub end_odometer: i64,
    pub notes: Option<String>,
    /// One of: Cash, Card, Transfer
    #[validate(length(min = 1, message = "payment_method is required"))]
    pub payment_method: String,
    /// Base64-encoded renter signature PNG
    #[validate(length(min = 1, message = "signature is required"))]
    pub signature_base64: String,
}

pub(super) fn decode_signature(encoded: &str) -> DomainResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| DomainError::Validation(format!("Invalid signature encoding: {}", e)))
}

pub(super) fn parse_payment_method(s: &str) -> DomainResult<PaymentMethod> {
    PaymentMethod::from_str(s)
        .ok_or_else(|| DomainError::Validation(format!("Unknown payment method: {}", s)))
}
