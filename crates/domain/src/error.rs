// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::report_status::ReportStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Report category is not part of the closed category set.
    InvalidCategory(String),
    /// Role name is not part of the closed role vocabulary.
    InvalidRole(String),
    /// Report status string is not recognized.
    InvalidReportStatus(String),
    /// Notification type string is not recognized.
    InvalidNotificationType(String),
    /// External handler kind is not recognized or its columns are inconsistent.
    InvalidExternalHandler(String),
    /// Report title is empty or too long.
    InvalidTitle(String),
    /// Report description is empty or too long.
    InvalidDescription(String),
    /// Coordinates are not finite or out of range.
    InvalidCoordinates {
        /// The rejected latitude.
        latitude: f64,
        /// The rejected longitude.
        longitude: f64,
    },
    /// A report must carry between 1 and 3 photos.
    InvalidPhotoCount {
        /// The number of photos supplied.
        count: usize,
    },
    /// Rejection reason is empty.
    InvalidRejectionReason(String),
    /// Message or note content is empty or too long.
    InvalidContent(String),
    /// Coordinates fall outside the municipal boundary.
    OutsideServiceArea {
        /// The rejected latitude.
        latitude: f64,
        /// The rejected longitude.
        longitude: f64,
    },
    /// The boundary polygon definition is unusable.
    InvalidBoundary(String),
    /// The requested edge is not part of the lifecycle graph.
    InvalidStatusTransition {
        /// The current status.
        from: ReportStatus,
        /// The requested status.
        to: ReportStatus,
    },
    /// The requested status equals the current status.
    NoOpTransition {
        /// The current (and requested) status.
        status: ReportStatus,
    },
    /// Operators may only move a report to `IN_PROGRESS`, `SUSPENDED` or `RESOLVED`.
    InvalidTargetStatus(ReportStatus),
    /// External delegation is only possible while the report is `ASSIGNED`.
    DelegationWindowClosed {
        /// The current status.
        status: ReportStatus,
    },
    /// The caller lacks the role required by an operation.
    MissingRole {
        /// The operation that was attempted.
        action: String,
        /// The role that would satisfy the precondition.
        required_role: String,
    },
    /// The caller is not the current handler of the report.
    NotReportHandler {
        /// The operation that was attempted.
        action: String,
        /// The caller's user id.
        user_id: i64,
    },
    /// The report is already delegated to the requested external handler.
    AlreadyDelegated {
        /// Description of the current handler.
        handler: String,
    },
    /// The technical officer is not in the eligible set for the report.
    IneligibleTechnical {
        /// The rejected technical officer id.
        technical_id: i64,
    },
    /// The external party is not in the eligible set for the report.
    IneligibleExternal {
        /// Description of the rejected handler.
        handler: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategory(value) => write!(f, "Invalid report category: '{value}'"),
            Self::InvalidRole(value) => write!(f, "Invalid role: '{value}'"),
            Self::InvalidReportStatus(value) => write!(f, "Invalid report status: '{value}'"),
            Self::InvalidNotificationType(value) => {
                write!(f, "Invalid notification type: '{value}'")
            }
            Self::InvalidExternalHandler(msg) => write!(f, "Invalid external handler: {msg}"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidCoordinates {
                latitude,
                longitude,
            } => {
                write!(
                    f,
                    "Invalid coordinates: latitude {latitude}, longitude {longitude}"
                )
            }
            Self::InvalidPhotoCount { count } => {
                write!(
                    f,
                    "Invalid photo count: {count}. A report needs between 1 and 3 photos"
                )
            }
            Self::InvalidRejectionReason(msg) => write!(f, "Invalid rejection reason: {msg}"),
            Self::InvalidContent(msg) => write!(f, "Invalid content: {msg}"),
            Self::OutsideServiceArea {
                latitude,
                longitude,
            } => {
                write!(
                    f,
                    "Location ({latitude}, {longitude}) is outside the municipal boundary"
                )
            }
            Self::InvalidBoundary(msg) => write!(f, "Invalid boundary: {msg}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot move a report from {from} to {to}")
            }
            Self::NoOpTransition { status } => {
                write!(f, "Report is already {status}")
            }
            Self::InvalidTargetStatus(status) => {
                write!(
                    f,
                    "Status {status} cannot be set directly; expected IN_PROGRESS, SUSPENDED or RESOLVED"
                )
            }
            Self::DelegationWindowClosed { status } => {
                write!(
                    f,
                    "External delegation requires status ASSIGNED, but the report is {status}"
                )
            }
            Self::MissingRole {
                action,
                required_role,
            } => {
                write!(f, "'{action}' requires the {required_role} role")
            }
            Self::NotReportHandler { action, user_id } => {
                write!(
                    f,
                    "User {user_id} is not a handler of this report and cannot '{action}'"
                )
            }
            Self::AlreadyDelegated { handler } => {
                write!(f, "Report is already delegated to {handler}")
            }
            Self::IneligibleTechnical { technical_id } => {
                write!(
                    f,
                    "Technical officer {technical_id} is not eligible for this report"
                )
            }
            Self::IneligibleExternal { handler } => {
                write!(f, "External handler {handler} is not eligible for this report")
            }
        }
    }
}

impl std::error::Error for DomainError {}
