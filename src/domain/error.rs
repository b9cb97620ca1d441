//! Domain errors

use thiserror::Error;

use super::reservation::ReservationStatus;

/// Reason code attached to a guard violation.
///
/// Surfaced verbatim to callers so the UI can render a specific,
/// actionable message instead of a generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionReason {
    /// Handover odometer is below the vehicle's current reading
    OdometerBelowCurrent,
    /// Return odometer must be strictly greater than the handover reading
    OdometerNotAdvanced,
    /// Handover/return requires a non-empty signature
    SignatureRequired,
    /// Vehicle is not currently available for a placeholder booking
    VehicleUnavailable,
}

impl PreconditionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OdometerBelowCurrent => "OdometerBelowCurrent",
            Self::OdometerNotAdvanced => "OdometerNotAdvanced",
            Self::SignatureRequired => "SignatureRequired",
            Self::VehicleUnavailable => "VehicleUnavailable",
        }
    }
}

impl std::fmt::Display for PreconditionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain-level error taxonomy
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid interval: end must be strictly after start")]
    InvalidInterval,

    #[error("Vehicle {vehicle_id} is already booked for an overlapping interval")]
    IntervalConflict { vehicle_id: String },

    #[error("Illegal transition: {event} is not allowed from status {from}")]
    InvalidTransition {
        event: &'static str,
        from: ReservationStatus,
    },

    #[error("Precondition failed: {0}")]
    PreconditionFailed(PreconditionReason),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried by the caller.
    /// Validation rejections are definitive and must never be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Upstream(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_is_transient() {
        assert!(DomainError::Upstream("db gone".into()).is_transient());
    }

    #[test]
    fn validation_rejections_are_definitive() {
        assert!(!DomainError::InvalidInterval.is_transient());
        assert!(!DomainError::PreconditionFailed(PreconditionReason::SignatureRequired)
            .is_transient());
        assert!(!DomainError::IntervalConflict {
            vehicle_id: "v-1".into()
        }
        .is_transient());
    }

    #[test]
    fn precondition_reason_codes() {
        assert_eq!(
            PreconditionReason::OdometerBelowCurrent.to_string(),
            "OdometerBelowCurrent"
        );
        assert_eq!(
            PreconditionReason::SignatureRequired.as_str(),
            "SignatureRequired"
        );
    }
}
