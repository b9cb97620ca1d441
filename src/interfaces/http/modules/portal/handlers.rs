//! Self-service portal handlers
//!
//! Public, token-gated surface. The path token is the capability: anyone
//! holding the link can view and complete the one pending reservation it
//! resolves to, nothing else. A consumed or bogus token reads as 404.

use std::sync::Arc;

use axum::extract::{Path, State};

use super::dto::{CompleteBookingRequest, StartBookingRequest, StartBookingResponse};
use crate::application::PortalService;
use crate::domain::Interval;
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::modules::reservations::ReservationDto;

#[derive(Clone)]
pub struct PortalState {
    pub portal: Arc<PortalService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/portal/reservations",
    tag = "Portal",
    request_body = StartBookingRequest,
    responses(
        (status = 200, description = "Placeholder created; token returned once", body = ApiResponse<StartBookingResponse>),
        (status = 400, description = "Vehicle not bookable"),
        (status = 404, description = "Unknown vehicle")
    )
)]
pub async fn start_booking(
    State(state): State<PortalState>,
    ValidatedJson(body): ValidatedJson<StartBookingRequest>,
) -> ApiResult<StartBookingResponse> {
    let booking = state.portal.start_booking(&body.vehicle_id).await?;
    ok(StartBookingResponse {
        reservation: booking.reservation.into(),
        token: booking.token,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/portal/reservations/{token}",
    tag = "Portal",
    params(("token" = String, Path, description = "Capability token from the booking link")),
    responses(
        (status = 200, description = "Pending reservation the token grants access to", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Unknown or consumed token")
    )
)]
pub async fn view_booking(
    State(state): State<PortalState>,
    Path(token): Path<String>,
) -> ApiResult<ReservationDto> {
    let reservation = state.portal.view(&token).await?;
    ok(reservation.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/portal/reservations/{token}/complete",
    tag = "Portal",
    params(("token" = String, Path, description = "Capability token from the booking link")),
    request_body = CompleteBookingRequest,
    responses(
        (status = 200, description = "Booking completed and scheduled", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Empty or inverted window"),
        (status = 404, description = "Unknown or consumed token"),
        (status = 409, description = "Window overlaps an existing reservation")
    )
)]
pub async fn complete_booking(
    State(state): State<PortalState>,
    Path(token): Path<String>,
    ValidatedJson(body): ValidatedJson<CompleteBookingRequest>,
) -> ApiResult<ReservationDto> {
    let interval = Interval::new(body.start, body.end)?;
    let reservation = state
        .portal
        .complete_booking(&token, body.renter(), interval)
        .await?;
    ok(reservation.into())
}
