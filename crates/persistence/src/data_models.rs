// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use participium_domain::{ReportCategory, ReportStatus, RoleSet};

/// Outcome of a persisted lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistTransitionResult {
    pub report_id: i64,
    /// The version now stored on the report row.
    pub version: i64,
    /// Ids of the notifications written with the transition, in draft order.
    pub notification_ids: Vec<i64>,
}

/// Restricts a report listing to reports handled by a user.
///
/// A report matches when the user is the internal assignee, the delegated
/// maintainer, or the named technician. It also matches when the report is
/// delegated to the user's company without a named technician.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerFilter {
    pub user_id: i64,
    pub company_id: Option<i64>,
}

/// Filters applied by `Persistence::list_reports`.
///
/// An empty `statuses` list means any status. Results are newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub report_id: Option<i64>,
    pub statuses: Vec<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub owner_id: Option<i64>,
    pub handler: Option<HandlerFilter>,
}

impl ReportFilter {
    #[must_use]
    pub fn with_statuses(statuses: &[ReportStatus]) -> Self {
        Self {
            statuses: statuses.to_vec(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn category(mut self, category: Option<ReportCategory>) -> Self {
        self.category = category;
        self
    }
}

/// A user to be created by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub roles: RoleSet,
    /// Links an external technician to their company.
    pub company_id: Option<i64>,
}

/// An external maintenance company to be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub categories: Vec<ReportCategory>,
    pub has_platform_access: bool,
}
