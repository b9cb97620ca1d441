//! Customer domain entity

use chrono::{DateTime, Utc};

/// Renter, created by staff or via a self-service portal
#[derive(Debug, Clone)]
pub struct Customer {
    /// Unique customer ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// Contact email (optional)
    pub email: Option<String>,
    /// Driver license number
    pub license_number: String,
    /// Reference to the uploaded driver-license image
    pub license_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: Option<String>,
        license_number: impl Into<String>,
        license_image_url: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            phone: phone.into(),
            email,
            license_number: license_number.into(),
            license_image_url,
            created_at: Utc::now(),
        }
    }
}
