//! Rental contract text
//!
//! Builds the snapshot the external generator sees, persists its output
//! verbatim on the reservation. A deterministic template implementation is
//! provided for deployments without the external text service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{
    ContractGenerator, ContractSnapshot, DomainError, DomainResult, RepositoryProvider,
    Reservation,
};

pub struct ContractService {
    repos: Arc<dyn RepositoryProvider>,
    generator: Arc<dyn ContractGenerator>,
}

impl ContractService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, generator: Arc<dyn ContractGenerator>) -> Self {
        Self { repos, generator }
    }

    /// Generate contract text for a fully specified reservation and persist
    /// it. Pending placeholders have no customer or dates to contract over.
    pub async fn generate_for(&self, reservation_id: &str) -> DomainResult<Reservation> {
        let mut reservation = self
            .repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation_id.to_string(),
            })?;

        let snapshot = self.snapshot_of(&reservation).await?;
        let text = self.generator.generate(&snapshot).await?;

        reservation.contract_text = Some(text);
        let status = reservation.status;
        let applied = self
            .repos
            .reservations()
            .update_if_status(reservation.clone(), status)
            .await?;
        if !applied {
            return Err(DomainError::Validation(
                "Reservation changed while generating the contract; retry".into(),
            ));
        }

        info!(reservation_id, "Contract text persisted");
        Ok(reservation)
    }

    async fn snapshot_of(&self, reservation: &Reservation) -> DomainResult<ContractSnapshot> {
        let incomplete = || DomainError::Validation(
            "Contract requires a fully specified reservation (customer, dates, price)".into(),
        );

        let customer_id = reservation.customer_id.as_deref().ok_or_else(incomplete)?;
        let start_at = reservation.start_at.ok_or_else(incomplete)?;
        let end_at = reservation.end_at.ok_or_else(incomplete)?;
        let total_price = reservation.total_price.ok_or_else(incomplete)?;

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(&reservation.vehicle_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: reservation.vehicle_id.clone(),
            })?;
        let customer = self
            .repos
            .customers()
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: customer_id.to_string(),
            })?;

        Ok(ContractSnapshot {
            reservation_id: reservation.id.clone(),
            vehicle_name: vehicle.name,
            vehicle_plate: vehicle.plate,
            customer_name: customer.name,
            license_number: customer.license_number,
            start_at,
            end_at,
            total_price,
        })
    }
}

/// Fills a fixed rental-agreement template from the snapshot.
pub struct TemplateContractGenerator;

#[async_trait]
impl ContractGenerator for TemplateContractGenerator {
    async fn generate(&self, s: &ContractSnapshot) -> DomainResult<String> {
        Ok(format!(
            "RENTAL AGREEMENT\n\
             Reservation: {}\n\
             Renter: {} (license {})\n\
             Vehicle: {} [{}]\n\
             Period: {} to {}\n\
             Total: {}\n",
            s.reservation_id,
            s.customer_name,
            s.license_number,
            s.vehicle_name,
            s.vehicle_plate,
            s.start_at.to_rfc3339(),
            s.end_at.to_rfc3339(),
            s.total_price,
        ))
    }
}
