//! Financial report DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::IncomeRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncomeRecordDto {
    pub id: String,
    /// Smallest currency unit
    pub amount: i64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub reservation_id: String,
}

impl From<IncomeRecord> for IncomeRecordDto {
    fn from(r: IncomeRecord) -> Self {
        Self {
            id: r.id,
            amount: r.amount,
            date: r.date,
            description: r.description,
            reservation_id: r.reservation_id,
        }
    }
}

/// Report window, half-open `[from, to)`
#[derive(Debug, Deserialize, IntoParams)]
pub struct IncomeQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IncomeReport {
    /// Sum of all records in the window, smallest currency unit
    pub total: i64,
    pub records: Vec<IncomeRecordDto>,
}
