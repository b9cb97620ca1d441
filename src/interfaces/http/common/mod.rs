//! Shared REST API plumbing: response envelope, error mapping, extractors

pub mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::ValidatedJson;

/// Standard API response wrapper
///
/// Every REST endpoint returns data in this envelope.
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Domain error carried out of a handler; maps to the right status code
/// in `IntoResponse` so handlers can use `?` throughout.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::InvalidInterval
        | DomainError::InvalidTransition { .. }
        | DomainError::PreconditionFailed(_) => StatusCode::BAD_REQUEST,
        DomainError::IntervalConflict { .. } => StatusCode::CONFLICT,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }
        (status, Json(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}

/// Handler result alias used by every module
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PreconditionReason;

    #[test]
    fn conflict_maps_to_409() {
        let e = DomainError::IntervalConflict {
            vehicle_id: "v1".into(),
        };
        assert_eq!(status_for(&e), StatusCode::CONFLICT);
    }

    #[test]
    fn guard_failures_map_to_400() {
        assert_eq!(status_for(&DomainError::InvalidInterval), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&DomainError::PreconditionFailed(
                PreconditionReason::OdometerBelowCurrent
            )),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_entity_maps_to_404() {
        let e = DomainError::NotFound {
            entity: "Vehicle",
            field: "id",
            value: "x".into(),
        };
        assert_eq!(status_for(&e), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_maps_to_502() {
        assert_eq!(
            status_for(&DomainError::Upstream("db down".into())),
            StatusCode::BAD_GATEWAY
        );
    }
}
