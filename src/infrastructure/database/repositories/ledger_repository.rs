//! SeaORM implementation of LedgerRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::ledger::{IncomeRecord, LedgerRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::income_record;

use super::db_err;

pub struct SeaOrmLedgerRepository {
    db: DatabaseConnection,
}

impl SeaOrmLedgerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: income_record::Model) -> IncomeRecord {
    IncomeRecord {
        id: m.id,
        amount: m.amount,
        date: m.date,
        description: m.description,
        reservation_id: m.reservation_id,
    }
}

#[async_trait]
impl LedgerRepository for SeaOrmLedgerRepository {
    async fn record_income(&self, record: IncomeRecord) -> DomainResult<()> {
        debug!(
            "Recording income {} for reservation {}",
            record.amount, record.reservation_id
        );
        let model = income_record::ActiveModel {
            id: Set(record.id),
            amount: Set(record.amount),
            date: Set(record.date),
            description: Set(record.description),
            reservation_id: Set(record.reservation_id),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<IncomeRecord>> {
        let models = income_record::Entity::find()
            .filter(income_record::Column::Date.gte(from))
            .filter(income_record::Column::Date.lt(to))
            .order_by_desc(income_record::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<IncomeRecord>> {
        let models = income_record::Entity::find()
            .order_by_desc(income_record::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
