// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API error taxonomy and translation from lower layers.
//!
//! Domain, core and persistence errors never cross this boundary as-is.
//! Each one is mapped explicitly onto an [`ApiError`] variant, so callers
//! only ever see the stable kinds returned by [`ApiError::kind`].

use participium::CoreError;
use participium_domain::DomainError;
use participium_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// Every variant is caller-actionable and none is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed input.
    #[error("Invalid input for field '{field}': {message}")]
    Validation { field: String, message: String },

    /// The caller's roles do not allow the operation.
    #[error("Unauthorized: '{action}' requires {required_role}")]
    Unauthorized {
        action: String,
        required_role: String,
    },

    /// The caller could not be identified.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    /// The report is not in a state that allows the operation.
    #[error("Invalid transition: {message}")]
    InvalidTransition { message: String },

    /// The requested assignee is not in the eligible set.
    #[error("Ineligible assignee: {message}")]
    IneligibleAssignee { message: String },

    /// The report location is outside the municipal boundary.
    #[error("Location ({latitude}, {longitude}) is outside the municipal boundary")]
    GeofenceRejection { latitude: String, longitude: String },

    /// A referenced resource does not exist or is not visible to the caller.
    #[error("{resource_type} not found: {message}")]
    NotFound {
        resource_type: String,
        message: String,
    },

    /// An unexpected failure in a lower layer.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Stable, machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Unauthorized { .. } => "authorization_error",
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::IneligibleAssignee { .. } => "ineligible_assignee",
            Self::GeofenceRejection { .. } => "geofence_rejection",
            Self::NotFound { .. } => "not_found",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn not_found(resource_type: &str, message: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            message: message.into(),
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidCategory(_) => ApiError::validation("category", message),
        DomainError::InvalidRole(_) => ApiError::validation("roles", message),
        DomainError::InvalidReportStatus(_) | DomainError::InvalidTargetStatus(_) => {
            ApiError::validation("status", message)
        }
        DomainError::InvalidNotificationType(_) => {
            ApiError::validation("notification_type", message)
        }
        DomainError::InvalidExternalHandler(_) => ApiError::validation("handler", message),
        DomainError::InvalidTitle(_) => ApiError::validation("title", message),
        DomainError::InvalidDescription(_) => ApiError::validation("description", message),
        DomainError::InvalidCoordinates { .. } => ApiError::validation("coordinates", message),
        DomainError::InvalidPhotoCount { .. } => ApiError::validation("photos", message),
        DomainError::InvalidRejectionReason(_) => ApiError::validation("reason", message),
        DomainError::InvalidContent(_) => ApiError::validation("content", message),
        DomainError::InvalidBoundary(_) => ApiError::Internal { message },
        DomainError::OutsideServiceArea {
            latitude,
            longitude,
        } => ApiError::GeofenceRejection {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        },
        DomainError::InvalidStatusTransition { .. }
        | DomainError::NoOpTransition { .. }
        | DomainError::DelegationWindowClosed { .. }
        | DomainError::AlreadyDelegated { .. } => ApiError::InvalidTransition { message },
        DomainError::MissingRole {
            action,
            required_role,
        } => ApiError::Unauthorized {
            action,
            required_role,
        },
        DomainError::NotReportHandler { action, .. } => ApiError::Unauthorized {
            action,
            required_role: String::from("a handler of this report"),
        },
        DomainError::IneligibleTechnical { .. } | DomainError::IneligibleExternal { .. } => {
            ApiError::IneligibleAssignee { message }
        }
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        exhausted @ CoreError::VersionExhausted { .. } => ApiError::Internal {
            message: exhausted.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// A stale report write means another transition won the race; the caller
/// sees the same kind it would see after re-reading the report.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ReportNotFound(id) => {
            ApiError::not_found("Report", format!("Report {id} does not exist"))
        }
        PersistenceError::UserNotFound(id) => {
            ApiError::not_found("User", format!("User {id} does not exist"))
        }
        PersistenceError::CompanyNotFound(id) => {
            ApiError::not_found("Company", format!("Company {id} does not exist"))
        }
        PersistenceError::NotificationNotFound(id) => ApiError::not_found(
            "Notification",
            format!("Notification {id} does not exist"),
        ),
        PersistenceError::StaleReport { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
        PersistenceError::DuplicateUsername(_) => ApiError::validation("username", err.to_string()),
        PersistenceError::DuplicateCompany(_) => ApiError::validation("name", err.to_string()),
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::InvalidStoredValue(_)
        | PersistenceError::NotFound(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use participium_domain::ReportStatus;

    #[test]
    fn test_kind_strings_are_stable() {
        let cases: Vec<(ApiError, &str)> = vec![
            (ApiError::validation("title", "empty"), "validation_error"),
            (
                ApiError::InvalidTransition {
                    message: String::new(),
                },
                "invalid_transition",
            ),
            (
                ApiError::GeofenceRejection {
                    latitude: String::from("41.9"),
                    longitude: String::from("12.4"),
                },
                "geofence_rejection",
            ),
            (ApiError::not_found("Report", "gone"), "not_found"),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn test_no_op_transition_is_invalid_transition() {
        let err = translate_core_error(CoreError::DomainViolation(DomainError::NoOpTransition {
            status: ReportStatus::InProgress,
        }));
        assert_eq!(err.kind(), "invalid_transition");
    }

    #[test]
    fn test_stale_report_is_invalid_transition() {
        let err = translate_persistence_error(PersistenceError::StaleReport {
            report_id: 4,
            expected_version: 0,
        });
        assert!(matches!(err, ApiError::InvalidTransition { .. }));
    }

    #[test]
    fn test_outside_service_area_keeps_coordinates() {
        let err = translate_domain_error(DomainError::OutsideServiceArea {
            latitude: 41.9028,
            longitude: 12.4964,
        });
        assert_eq!(
            err.to_string(),
            "Location (41.9028, 12.4964) is outside the municipal boundary"
        );
    }
}
