// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::eligibility::EligibleExternal;
use crate::notifications::NotificationDraft;
use participium_domain::{Report, ReportStatus, RoleSet};
use serde::{Deserialize, Serialize};

/// The caller of a lifecycle operation, as supplied by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub roles: RoleSet,
}

impl Actor {
    #[must_use]
    pub const fn new(user_id: i64, roles: RoleSet) -> Self {
        Self { user_id, roles }
    }
}

/// Tunable assignment rules. Both switches are off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPolicy {
    /// Widen the technical eligible set with officers who previously
    /// handled reports of the same category.
    pub include_previous_handlers: bool,
    /// Let the current external maintainer delegate to another external
    /// party while the report is still `ASSIGNED`.
    pub allow_maintainer_redelegation: bool,
}

/// Everything `apply` needs beyond the report itself.
///
/// Built by the caller from the assignment resolver and the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionContext {
    /// User ids of eligible technical officers.
    pub eligible_technicals: Vec<i64>,
    /// Eligible external parties, with company rosters.
    pub eligible_externals: Vec<EligibleExternal>,
    /// Users resolved from the report's current external handler.
    pub current_external_users: Vec<i64>,
    pub policy: AssignmentPolicy,
}

/// The outcome of a successful transition.
///
/// The caller persists `report` only if the stored row still matches
/// `expected_status` and `expected_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The report as read before the transition.
    pub previous: Report,
    /// The report with the transition applied and its version bumped.
    pub report: Report,
    pub expected_status: ReportStatus,
    pub expected_version: i64,
    /// One entry per affected party.
    pub notifications: Vec<NotificationDraft>,
}
