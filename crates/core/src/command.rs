// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use participium_domain::{ExternalHandler, ReportStatus};

/// A command represents user intent as data only.
///
/// Commands are the only way to request a change of a report's workflow
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Accept a pending report and hand it to a technical officer.
    Approve {
        /// The technical officer receiving the report.
        assigned_technical_id: i64,
    },
    /// Turn a pending report down.
    Reject {
        /// Shown verbatim to the citizen.
        reason: String,
    },
    /// Delegate an assigned report to an external maintainer or company.
    AssignToExternal {
        /// The delegation target.
        handler: ExternalHandler,
    },
    /// Move an assigned report through its working states.
    UpdateStatus {
        /// One of `IN_PROGRESS`, `SUSPENDED`, `RESOLVED`.
        target: ReportStatus,
    },
}

impl Command {
    /// A stable name for logging.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "Approve",
            Self::Reject { .. } => "Reject",
            Self::AssignToExternal { .. } => "AssignToExternal",
            Self::UpdateStatus { .. } => "UpdateStatus",
        }
    }
}
