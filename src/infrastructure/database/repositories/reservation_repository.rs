//! SeaORM implementation of ReservationRepository
//!
//! `update_if_status` is the compare-and-set the state machine relies on:
//! a single UPDATE filtered on (id, status), checked via rows_affected.

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::reservation::{
    PaymentMethod, Reservation, ReservationRepository, ReservationStatus,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::reservation;

use super::db_err;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        vehicle_id: m.vehicle_id,
        customer_id: m.customer_id,
        start_at: m.start_at,
        end_at: m.end_at,
        status: ReservationStatus::from_str(&m.status),
        start_odometer: m.start_odometer,
        end_odometer: m.end_odometer,
        notes: m.notes,
        payment_method: m.payment_method.as_deref().and_then(PaymentMethod::from_str),
        total_price: m.total_price,
        token_hash: m.token_hash,
        handover_signature_url: m.handover_signature_url,
        return_signature_url: m.return_signature_url,
        contract_text: m.contract_text,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: Set(r.id),
        vehicle_id: Set(r.vehicle_id),
        customer_id: Set(r.customer_id),
        start_at: Set(r.start_at),
        end_at: Set(r.end_at),
        status: Set(r.status.as_str().to_string()),
        start_odometer: Set(r.start_odometer),
        end_odometer: Set(r.end_odometer),
        notes: Set(r.notes),
        payment_method: Set(r.payment_method.map(|p| p.as_str().to_string())),
        total_price: Set(r.total_price),
        token_hash: Set(r.token_hash),
        handover_signature_url: Set(r.handover_signature_url),
        return_signature_url: Set(r.return_signature_url),
        contract_text: Set(r.contract_text),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn save(&self, r: Reservation) -> DomainResult<()> {
        debug!("Saving reservation: {}", r.id);
        domain_to_active(r).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .order_by_desc(reservation::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_occupying_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> DomainResult<Vec<Reservation>> {
        let occupying = [
            ReservationStatus::Scheduled.as_str(),
            ReservationStatus::Active.as_str(),
        ];
        let models = reservation::Entity::find()
            .filter(reservation::Column::VehicleId.eq(vehicle_id))
            .filter(reservation::Column::Status.is_in(occupying))
            .order_by_asc(reservation::Column::StartAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find()
            .filter(reservation::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update_if_status(
        &self,
        r: Reservation,
        expected: ReservationStatus,
    ) -> DomainResult<bool> {
        debug!("CAS update reservation {} (expect {})", r.id, expected);
        let id = r.id.clone();
        let result = reservation::Entity::update_many()
            .set(domain_to_active(r))
            .filter(reservation::Column::Id.eq(id))
            .filter(reservation::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected == 1)
    }
}
