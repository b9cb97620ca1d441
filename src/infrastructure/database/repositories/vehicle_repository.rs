//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::vehicle::{RateSchedule, Vehicle, VehicleRepository, VehicleStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::vehicle;

use super::db_err;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        name: m.name,
        plate: m.plate,
        rates: RateSchedule {
            rate_4h: m.rate_4h,
            rate_12h: m.rate_12h,
            daily_rate: m.daily_rate,
        },
        current_mileage: m.current_mileage,
        status: VehicleStatus::from_str(&m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(v: Vehicle) -> vehicle::ActiveModel {
    vehicle::ActiveModel {
        id: Set(v.id),
        name: Set(v.name),
        plate: Set(v.plate),
        rate_4h: Set(v.rates.rate_4h),
        rate_12h: Set(v.rates.rate_12h),
        daily_rate: Set(v.rates.daily_rate),
        current_mileage: Set(v.current_mileage),
        status: Set(v.status.as_str().to_string()),
        created_at: Set(v.created_at),
        updated_at: Set(v.updated_at),
    }
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn save(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Saving vehicle: {}", v.id);
        domain_to_active(v).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .order_by_asc(vehicle::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Updating vehicle: {}", v.id);
        let existing = vehicle::Entity::find_by_id(&v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: v.id,
            });
        }
        domain_to_active(v).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn set_status(&self, id: &str, status: VehicleStatus) -> DomainResult<()> {
        let result = vehicle::Entity::update_many()
            .col_expr(
                vehicle::Column::Status,
                sea_orm::sea_query::Expr::value(status.as_str()),
            )
            .col_expr(
                vehicle::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(vehicle::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }

    async fn set_current_mileage(&self, id: &str, mileage: i64) -> DomainResult<()> {
        let result = vehicle::Entity::update_many()
            .col_expr(
                vehicle::Column::CurrentMileage,
                sea_orm::sea_query::Expr::value(mileage),
            )
            .col_expr(
                vehicle::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(vehicle::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
