//! Income ledger repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::IncomeRecord;
use crate::domain::DomainResult;

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Book an income record
    async fn record_income(&self, record: IncomeRecord) -> DomainResult<()>;

    /// All records with `from <= date < to`, newest first
    async fn find_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<IncomeRecord>>;

    /// All records, newest first
    async fn find_all(&self) -> DomainResult<Vec<IncomeRecord>>;
}
