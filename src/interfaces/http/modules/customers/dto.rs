//! Customer DTOs

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::NewCustomer;
use crate::domain::{Customer, DomainError, DomainResult};

/// Customer as exposed over the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub license_number: String,
    pub license_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone: c.phone,
            email: c.email,
            license_number: c.license_number,
            license_image_url: c.license_image_url,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100, message = "customer name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 30, message = "phone is required"))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50, message = "license number is required"))]
    pub license_number: String,
    /// Base64-encoded driver license image (PNG/JPEG), optional
    pub license_image_base64: Option<String>,
}

impl CreateCustomerRequest {
    pub fn into_new_customer(self) -> DomainResult<NewCustomer> {
        let license_image = match self.license_image_base64 {
            Some(encoded) => Some(
                base64::engine::general_purpose::STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| {
                        DomainError::Validation(format!("Invalid license image encoding: {}", e))
                    })?,
            ),
            None => None,
        };
        Ok(NewCustomer {
            name: self.name,
            phone: self.phone,
            email: self.email,
            license_number: self.license_number,
            license_image,
        })
    }
}
