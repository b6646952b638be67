// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::category::ReportCategory;
use crate::error::DomainError;
use crate::report_status::ReportStatus;
use crate::role::RoleSet;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The party a report has been delegated to outside the municipality.
///
/// Delegation never replaces the internal assignee; it is recorded next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExternalHandler {
    /// An independent maintainer with their own platform account.
    User { external_maintainer_id: i64 },
    /// A maintenance company, optionally narrowed to one of its technicians.
    Company {
        external_company_id: i64,
        technician_id: Option<i64>,
    },
}

impl ExternalHandler {
    /// Discriminant stored in the `external_handler_type` column.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::Company { .. } => "company",
        }
    }

    /// Rebuilds a handler from its persisted columns.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidExternalHandler` if the discriminant is
    /// unknown or the id required by the variant is missing.
    pub fn from_columns(
        kind: Option<&str>,
        maintainer_id: Option<i64>,
        company_id: Option<i64>,
        technician_id: Option<i64>,
    ) -> Result<Option<Self>, DomainError> {
        match (kind, maintainer_id, company_id) {
            (None, _, _) => Ok(None),
            (Some("user"), Some(external_maintainer_id), _) => Ok(Some(Self::User {
                external_maintainer_id,
            })),
            (Some("company"), _, Some(external_company_id)) => Ok(Some(Self::Company {
                external_company_id,
                technician_id,
            })),
            (Some(other), _, _) => Err(DomainError::InvalidExternalHandler(format!(
                "'{other}' handler is missing its id or is not a known handler type"
            ))),
        }
    }

    #[must_use]
    pub const fn maintainer_id(&self) -> Option<i64> {
        match self {
            Self::User {
                external_maintainer_id,
            } => Some(*external_maintainer_id),
            Self::Company { .. } => None,
        }
    }

    #[must_use]
    pub const fn company_id(&self) -> Option<i64> {
        match self {
            Self::Company {
                external_company_id,
                ..
            } => Some(*external_company_id),
            Self::User { .. } => None,
        }
    }

    #[must_use]
    pub const fn technician_id(&self) -> Option<i64> {
        match self {
            Self::Company { technician_id, .. } => *technician_id,
            Self::User { .. } => None,
        }
    }
}

impl std::fmt::Display for ExternalHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User {
                external_maintainer_id,
            } => write!(f, "maintainer {external_maintainer_id}"),
            Self::Company {
                external_company_id,
                technician_id: Some(technician_id),
            } => write!(
                f,
                "company {external_company_id} (technician {technician_id})"
            ),
            Self::Company {
                external_company_id,
                technician_id: None,
            } => write!(f, "company {external_company_id}"),
        }
    }
}

/// A stored report photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPhoto {
    pub photo_id: i64,
    pub report_id: i64,
    pub url: String,
    pub filename: String,
}

/// A photo returned by the storage collaborator, not yet attached to a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReportPhoto {
    pub url: String,
    pub filename: String,
}

/// The report aggregate.
///
/// `user_id` is the reporting citizen for the whole life of the report.
/// `assigned_to_id` and `external_handler` record delegation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    pub coordinates: Coordinates,
    pub address: String,
    pub is_anonymous: bool,
    pub status: ReportStatus,
    pub assigned_to_id: Option<i64>,
    pub external_handler: Option<ExternalHandler>,
    pub rejected_reason: Option<String>,
    /// Incremented on every persisted transition.
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
    pub photos: Vec<ReportPhoto>,
}

impl Report {
    /// Returns true if `user_id` is the internal assignee.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.assigned_to_id == Some(user_id)
    }

    /// Returns true if the caller may delegate this report outward: the
    /// internal assignee, still holding a technical role for its category.
    #[must_use]
    pub fn is_delegating_officer(&self, user_id: i64, roles: &RoleSet) -> bool {
        self.is_assigned_to(user_id) && roles.covers_category(self.category)
    }
}

/// A validated citizen submission, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    pub coordinates: Coordinates,
    pub address: String,
    pub is_anonymous: bool,
    pub photos: Vec<NewReportPhoto>,
}

/// A public conversation entry on a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMessage {
    pub message_id: i64,
    pub report_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: String,
}

/// A staff-only annotation.
///
/// Author name and role are captured when the note is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalNote {
    pub note_id: i64,
    pub report_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub author_role: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    StatusChanged,
    MessageReceived,
    Assigned,
    Approved,
    Rejected,
}

impl NotificationType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StatusChanged => "STATUS_CHANGED",
            Self::MessageReceived => "MESSAGE_RECEIVED",
            Self::Assigned => "ASSIGNED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl FromStr for NotificationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STATUS_CHANGED" => Ok(Self::StatusChanged),
            "MESSAGE_RECEIVED" => Ok(Self::MessageReceived),
            "ASSIGNED" => Ok(Self::Assigned),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidNotificationType(s.to_string())),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A durable notification record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: i64,
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub report_id: Option<i64>,
    pub created_at: String,
}

/// A platform account, as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    pub roles: RoleSet,
    /// Set for technicians employed by an external company.
    pub company_id: Option<i64>,
}

/// An external maintenance company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCompany {
    pub company_id: i64,
    pub name: String,
    pub categories: Vec<ReportCategory>,
    pub has_platform_access: bool,
}
