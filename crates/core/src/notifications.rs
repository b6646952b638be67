// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification composition.
//!
//! Drafts are plain data. They become durable records only when the caller
//! persists them together with the transition that produced them.

use crate::state::Actor;
use participium_domain::{NotificationType, Report, ReportStatus};
use serde::{Deserialize, Serialize};

/// A notification that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDraft {
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub report_id: Option<i64>,
}

impl NotificationDraft {
    #[must_use]
    pub fn new(
        user_id: i64,
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        report_id: Option<i64>,
    ) -> Self {
        Self {
            user_id,
            notification_type,
            title: title.into(),
            message: message.into(),
            report_id,
        }
    }
}

/// Tells the citizen their report was approved.
#[must_use]
pub fn approved(report: &Report) -> NotificationDraft {
    NotificationDraft::new(
        report.user_id,
        NotificationType::Approved,
        "Report approved",
        format!(
            "Your report \"{}\" has been approved and assigned to a technical officer.",
            report.title
        ),
        Some(report.report_id),
    )
}

/// Tells a technical officer a report was assigned to them.
#[must_use]
pub fn assigned(report: &Report, assignee_id: i64) -> NotificationDraft {
    NotificationDraft::new(
        assignee_id,
        NotificationType::Assigned,
        "New report assigned",
        format!(
            "Report \"{}\" ({}) has been assigned to you.",
            report.title, report.category
        ),
        Some(report.report_id),
    )
}

/// Tells the citizen their report was rejected, quoting the reason.
#[must_use]
pub fn rejected(report: &Report, reason: &str) -> NotificationDraft {
    NotificationDraft::new(
        report.user_id,
        NotificationType::Rejected,
        "Report rejected",
        format!(
            "Your report \"{}\" has been rejected. Reason: {reason}",
            report.title
        ),
        Some(report.report_id),
    )
}

#[must_use]
pub fn status_changed(report: &Report, from: ReportStatus, to: ReportStatus) -> NotificationDraft {
    NotificationDraft::new(
        report.user_id,
        NotificationType::StatusChanged,
        "Report status updated",
        format!(
            "The status of your report \"{}\" changed from {from} to {to}.",
            report.title
        ),
        Some(report.report_id),
    )
}

/// Tells an external party a report was delegated to them.
#[must_use]
pub fn external_assigned(report: &Report, recipient_id: i64) -> NotificationDraft {
    NotificationDraft::new(
        recipient_id,
        NotificationType::Assigned,
        "New external assignment",
        format!(
            "Report \"{}\" ({}) has been delegated to you by the municipality.",
            report.title, report.category
        ),
        Some(report.report_id),
    )
}

#[must_use]
pub fn message_received(report: &Report, recipient_id: i64) -> NotificationDraft {
    NotificationDraft::new(
        recipient_id,
        NotificationType::MessageReceived,
        "New message",
        format!("You have a new message on report \"{}\".", report.title),
        Some(report.report_id),
    )
}

/// Who is notified when `sender` posts a message on `report`.
///
/// The citizen's messages go to whoever currently works the report: the
/// external users when delegated (falling back to the internal assignee
/// when the handler has no platform users), else the internal assignee.
/// Nobody is notified while the report is unassigned. Any other sender
/// notifies the citizen. The sender never notifies themselves.
#[must_use]
pub fn message_recipients(report: &Report, sender: &Actor, external_users: &[i64]) -> Vec<i64> {
    let mut recipients: Vec<i64> = if sender.user_id == report.user_id {
        if report.external_handler.is_some() && !external_users.is_empty() {
            external_users.to_vec()
        } else {
            report.assigned_to_id.into_iter().collect()
        }
    } else {
        vec![report.user_id]
    };
    recipients.retain(|id| *id != sender.user_id);
    recipients.sort_unstable();
    recipients.dedup();
    recipients
}
