//! In-memory repositories for development and testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{
    Customer, CustomerRepository, DomainError, DomainResult, IncomeRecord, LedgerRepository,
    RepositoryProvider, Reservation, ReservationRepository, ReservationStatus, Vehicle,
    VehicleRepository, VehicleStatus,
};

/// In-memory repository provider backed by `DashMap`s.
///
/// `update_if_status` relies on `DashMap`'s per-entry locking: the status
/// check and the write happen while the entry guard is held, so it gives
/// the same compare-and-set semantics as the SQL implementation.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    vehicles: DashMap<String, Vehicle>,
    customers: DashMap<String, Customer>,
    reservations: DashMap<String, Reservation>,
    income: DashMap<String, IncomeRecord>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn customers(&self) -> &dyn CustomerRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }

    fn ledger(&self) -> &dyn LedgerRepository {
        self
    }
}

#[async_trait]
impl VehicleRepository for InMemoryRepositoryProvider {
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()> {
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(id).map(|v| v.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        Ok(self.vehicles.iter().map(|v| v.clone()).collect())
    }

    async fn update(&self, vehicle: Vehicle) -> DomainResult<()> {
        if !self.vehicles.contains_key(&vehicle.id) {
            return Err(not_found("Vehicle", &vehicle.id));
        }
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    async fn set_status(&self, id: &str, status: VehicleStatus) -> DomainResult<()> {
        let mut vehicle = self.vehicles.get_mut(id).ok_or_else(|| not_found("Vehicle", id))?;
        vehicle.status = status;
        vehicle.updated_at = Utc::now();
        Ok(())
    }

    async fn set_current_mileage(&self, id: &str, mileage: i64) -> DomainResult<()> {
        let mut vehicle = self.vehicles.get_mut(id).ok_or_else(|| not_found("Vehicle", id))?;
        vehicle.current_mileage = mileage;
        vehicle.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryRepositoryProvider {
    async fn save(&self, customer: Customer) -> DomainResult<()> {
        self.customers.insert(customer.id.clone(), customer);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Customer>> {
        Ok(self.customers.get(id).map(|c| c.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        Ok(self.customers.iter().map(|c| c.clone()).collect())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepositoryProvider {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        self.reservations
            .insert(reservation.id.clone(), reservation);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.reservations.iter().map(|r| r.clone()).collect())
    }

    async fn find_occupying_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id && r.status.occupies_vehicle())
            .map(|r| r.clone())
            .collect())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> DomainResult<Option<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .find(|r| r.token_hash.as_deref() == Some(token_hash))
            .map(|r| r.clone()))
    }

    async fn update_if_status(
        &self,
        reservation: Reservation,
        expected: ReservationStatus,
    ) -> DomainResult<bool> {
        let mut entry = self
            .reservations
            .get_mut(&reservation.id)
            .ok_or_else(|| not_found("Reservation", &reservation.id))?;
        if entry.status != expected {
            return Ok(false);
        }
        *entry = reservation;
        Ok(true)
    }
}

#[async_trait]
impl LedgerRepository for InMemoryRepositoryProvider {
    async fn record_income(&self, record: IncomeRecord) -> DomainResult<()> {
        self.income.insert(record.id.clone(), record);
        Ok(())
    }

    async fn find_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<IncomeRecord>> {
        let mut records: Vec<IncomeRecord> = self
            .income
            .iter()
            .filter(|r| r.date >= from && r.date < to)
            .map(|r| r.clone())
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn find_all(&self) -> DomainResult<Vec<IncomeRecord>> {
        let mut records: Vec<IncomeRecord> =
            self.income.iter().map(|r| r.clone()).collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }
}

fn not_found(entity: &'static str, id: &str) -> DomainError {
    DomainError::NotFound {
        entity,
        field: "id",
        value: id.to_string(),
    }
}
