//! Vehicle repository interface

use async_trait::async_trait;

use super::model::{Vehicle, VehicleStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Save a new vehicle
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Find vehicle by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>>;

    /// Find all vehicles (any status)
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>>;

    /// Update an existing vehicle
    async fn update(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Set fleet status (Available / Rented / Maintenance)
    async fn set_status(&self, id: &str, status: VehicleStatus) -> DomainResult<()>;

    /// Advance the current odometer reading (kilometers)
    async fn set_current_mileage(&self, id: &str, mileage: i64) -> DomainResult<()>;
}
