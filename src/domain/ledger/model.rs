//! Financial income ledger entry

use chrono::{DateTime, Utc};

/// Income booked when a rental completes
#[derive(Debug, Clone)]
pub struct IncomeRecord {
    /// Unique record ID
    pub id: String,
    /// Amount in the smallest currency unit
    pub amount: i64,
    /// When the income was realized
    pub date: DateTime<Utc>,
    /// Human-readable description
    pub description: String,
    /// Reservation this income settles
    pub reservation_id: String,
}

impl IncomeRecord {
    pub fn new(
        amount: i64,
        date: DateTime<Utc>,
        description: impl Into<String>,
        reservation_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            date,
            description: description.into(),
            reservation_id: reservation_id.into(),
        }
    }
}
