// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report status states and the lifecycle graph.
//!
//! `REJECTED` and `RESOLVED` are terminal. External delegation happens
//! while `ASSIGNED` and does not change the status.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    /// Filed by a citizen, waiting for public relations review.
    PendingApproval,
    /// Approved and assigned to a technical officer.
    Assigned,
    /// Work has started.
    InProgress,
    /// Work is paused.
    Suspended,
    /// The issue has been fixed.
    Resolved,
    /// Public relations turned the report down.
    Rejected,
}

impl ReportStatus {
    pub const ALL: [Self; 6] = [
        Self::PendingApproval,
        Self::Assigned,
        Self::InProgress,
        Self::Suspended,
        Self::Resolved,
        Self::Rejected,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Assigned => "ASSIGNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Suspended => "SUSPENDED",
            Self::Resolved => "RESOLVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }

    /// Statuses reached after approval; these reports are visible to the public.
    #[must_use]
    pub const fn is_publicly_visible(&self) -> bool {
        matches!(
            self,
            Self::Assigned | Self::InProgress | Self::Suspended | Self::Resolved
        )
    }

    /// Statuses a report handler may request through a status update.
    #[must_use]
    pub const fn is_operator_target(&self) -> bool {
        matches!(self, Self::InProgress | Self::Suspended | Self::Resolved)
    }

    /// Checks whether `target` is reachable from this status in one step.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::PendingApproval, Self::Assigned | Self::Rejected)
                | (
                    Self::Assigned,
                    Self::InProgress | Self::Suspended | Self::Resolved
                )
                | (Self::InProgress, Self::Suspended | Self::Resolved)
                | (Self::Suspended, Self::InProgress | Self::Resolved)
        )
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoOpTransition` when `target` equals the current
    /// status, and `DomainError::InvalidStatusTransition` for any edge that is
    /// not part of the lifecycle graph.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if *self == target {
            return Err(DomainError::NoOpTransition { status: *self });
        }
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: *self,
                to: target,
            })
        }
    }
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidReportStatus(s.to_string()))
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
