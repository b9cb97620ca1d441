//! Vehicle REST API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};

use super::dto::{
    AvailabilityQuery, CreateVehicleRequest, SetVehicleStatusRequest, VehicleDto,
};
use crate::application::ReservationService;
use crate::domain::{
    DomainError, Interval, RepositoryProvider, Vehicle, VehicleStatus,
};
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct VehicleState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub reservations: Arc<ReservationService>,
}

fn parse_status(s: &str) -> Result<VehicleStatus, DomainError> {
    match s {
        "Available" => Ok(VehicleStatus::Available),
        "Rented" => Ok(VehicleStatus::Rented),
        "Maintenance" => Ok(VehicleStatus::Maintenance),
        other => Err(DomainError::Validation(format!(
            "Unknown vehicle status: {}",
            other
        ))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Fleet list", body = ApiResponse<Vec<VehicleDto>>)
    )
)]
pub async fn list_vehicles(State(state): State<VehicleState>) -> ApiResult<Vec<VehicleDto>> {
    let vehicles = state.repos.vehicles().find_all().await?;
    ok(vehicles.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = CreateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle registered", body = ApiResponse<VehicleDto>),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleState>,
    ValidatedJson(body): ValidatedJson<CreateVehicleRequest>,
) -> ApiResult<VehicleDto> {
    let vehicle = Vehicle::new(
        &body.name,
        &body.plate,
        body.rates(),
        body.current_mileage,
    );
    state.repos.vehicles().save(vehicle.clone()).await?;
    ok(vehicle.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/available",
    tag = "Vehicles",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Vehicles free for the window", body = ApiResponse<Vec<VehicleDto>>),
        (status = 400, description = "Empty or inverted window")
    )
)]
pub async fn available_vehicles(
    State(state): State<VehicleState>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Vec<VehicleDto>> {
    let interval = Interval::new(query.start, query.end)?;
    let vehicles = state.reservations.available_vehicles(interval).await?;
    ok(vehicles.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleState>,
    Path(id): Path<String>,
) -> ApiResult<VehicleDto> {
    let vehicle = state
        .repos
        .vehicles()
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Vehicle",
            field: "id",
            value: id,
        })?;
    ok(vehicle.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}/status",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    request_body = SetVehicleStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Unknown status")
    )
)]
pub async fn set_vehicle_status(
    State(state): State<VehicleState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<SetVehicleStatusRequest>,
) -> ApiResult<VehicleDto> {
    let status = parse_status(&body.status)?;
    state.repos.vehicles().set_status(&id, status).await?;
    let vehicle = state
        .repos
        .vehicles()
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Vehicle",
            field: "id",
            value: id,
        })?;
    ok(vehicle.into())
}
