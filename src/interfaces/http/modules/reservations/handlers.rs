//! Reservation REST API handlers
//!
//! Staff-facing lifecycle surface: full creation, handover, return,
//! cancellation and contract generation. The self-service entry points
//! live in the `portal` module; both funnel into the same service.

use std::sync::Arc;

use axum::extract::{Path, State};

use super::dto::{
    decode_signature, parse_payment_method, ActivateReservationRequest,
    CompleteReservationRequest, CreateReservationRequest, ReservationDto,
};
use crate::application::{ContractService, ReservationService};
use crate::domain::{DomainError, Interval, RepositoryProvider};
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct ReservationState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub reservations: Arc<ReservationService>,
    pub contracts: Arc<ContractService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "All reservations", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationState>,
) -> ApiResult<Vec<ReservationDto>> {
    let reservations = state.repos.reservations().find_all().await?;
    ok(reservations.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation scheduled", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Empty or inverted window"),
        (status = 404, description = "Unknown customer or vehicle"),
        (status = 409, description = "Window overlaps an existing reservation")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationState>,
    ValidatedJson(body): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<ReservationDto> {
    let interval = Interval::new(body.start, body.end)?;
    let reservation = state
        .reservations
        .create_full(&body.customer_id, &body.vehicle_id, interval)
        .await?;
    ok(reservation.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationState>,
    Path(id): Path<String>,
) -> ApiResult<ReservationDto> {
    let reservation = state
        .repos
        .reservations()
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Reservation",
            field: "id",
            value: id,
        })?;
    ok(reservation.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/activate",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    request_body = ActivateReservationRequest,
    responses(
        (status = 200, description = "Rental activated", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Wrong state or odometer below current"),
        (status = 404, description = "Not found")
    )
)]
pub async fn activate_reservation(
    State(state): State<ReservationState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<ActivateReservationRequest>,
) -> ApiResult<ReservationDto> {
    let signature = decode_signature(&body.signature_base64)?;
    let reservation = state
        .reservations
        .activate(&id, body.start_odometer, &signature)
        .await?;
    ok(reservation.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/complete",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    request_body = CompleteReservationRequest,
    responses(
        (status = 200, description = "Rental completed, income booked", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Wrong state or odometer did not advance"),
        (status = 404, description = "Not found")
    )
)]
pub async fn complete_reservation(
    State(state): State<ReservationState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<CompleteReservationRequest>,
) -> ApiResult<ReservationDto> {
    let signature = decode_signature(&body.signature_base64)?;
    let method = parse_payment_method(&body.payment_method)?;
    let reservation = state
        .reservations
        .complete(&id, body.end_odometer, body.notes, method, &signature)
        .await?;
    ok(reservation.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Active or already terminal"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationState>,
    Path(id): Path<String>,
) -> ApiResult<ReservationDto> {
    let reservation = state.reservations.cancel(&id).await?;
    ok(reservation.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/contract",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Contract generated and stored", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Reservation has no customer or dates yet")
    )
)]
pub async fn generate_contract(
    State(state): State<ReservationState>,
    Path(id): Path<String>,
) -> ApiResult<ReservationDto> {
    let reservation = state.contracts.generate_for(&id).await?;
    ok(reservation.into())
}
