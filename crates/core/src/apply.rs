// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::notifications::{self, NotificationDraft};
use crate::state::{Actor, TransitionContext, TransitionResult};
use participium_domain::{
    DomainError, ExternalHandler, Report, ReportStatus, Role, validate_rejection_reason,
};

/// Applies a command to a report, producing the updated report and the
/// notifications the transition fires.
///
/// This function is pure. Nothing is persisted; the caller must write the
/// result conditionally on `expected_status` and `expected_version`.
///
/// Preconditions are checked in a fixed order: the report's current status,
/// then the caller's role and identity, then assignee eligibility.
///
/// # Arguments
///
/// * `report` - The report as currently stored
/// * `actor` - The authenticated caller
/// * `command` - The requested transition
/// * `context` - Eligible sets and policy computed by the caller
///
/// # Errors
///
/// Returns an error if:
/// - The transition is not allowed from the current status
/// - The caller lacks the required role or is not a handler of the report
/// - The requested assignee is not in the eligible set
/// - Command input is malformed (blank reason, non-operator target status)
/// - The version counter would overflow
pub fn apply(
    report: &Report,
    actor: &Actor,
    command: Command,
    context: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let mut next: Report = report.clone();

    let notifications: Vec<NotificationDraft> = match command {
        Command::Approve {
            assigned_technical_id,
        } => approve(actor, assigned_technical_id, context, &mut next)?,
        Command::Reject { reason } => reject(actor, reason, &mut next)?,
        Command::AssignToExternal { handler } => {
            assign_to_external(actor, handler, context, &mut next)?
        }
        Command::UpdateStatus { target } => update_status(actor, target, context, &mut next)?,
    };

    next.version = report
        .version
        .checked_add(1)
        .ok_or(CoreError::VersionExhausted {
            report_id: report.report_id,
        })?;

    Ok(TransitionResult {
        previous: report.clone(),
        report: next,
        expected_status: report.status,
        expected_version: report.version,
        notifications,
    })
}

fn require_role(actor: &Actor, role: Role, action: &str) -> Result<(), DomainError> {
    if actor.roles.has_role(role) {
        Ok(())
    } else {
        Err(DomainError::MissingRole {
            action: action.to_string(),
            required_role: role.to_string(),
        })
    }
}

fn approve(
    actor: &Actor,
    assigned_technical_id: i64,
    context: &TransitionContext,
    report: &mut Report,
) -> Result<Vec<NotificationDraft>, DomainError> {
    report.status.validate_transition(ReportStatus::Assigned)?;
    require_role(actor, Role::PublicRelations, "approve")?;
    if !context.eligible_technicals.contains(&assigned_technical_id) {
        return Err(DomainError::IneligibleTechnical {
            technical_id: assigned_technical_id,
        });
    }

    report.status = ReportStatus::Assigned;
    report.assigned_to_id = Some(assigned_technical_id);

    Ok(vec![
        notifications::approved(report),
        notifications::assigned(report, assigned_technical_id),
    ])
}

fn reject(
    actor: &Actor,
    reason: String,
    report: &mut Report,
) -> Result<Vec<NotificationDraft>, DomainError> {
    report.status.validate_transition(ReportStatus::Rejected)?;
    require_role(actor, Role::PublicRelations, "reject")?;
    validate_rejection_reason(&reason)?;

    let notification = notifications::rejected(report, &reason);
    report.status = ReportStatus::Rejected;
    report.rejected_reason = Some(reason);

    Ok(vec![notification])
}

fn assign_to_external(
    actor: &Actor,
    handler: ExternalHandler,
    context: &TransitionContext,
    report: &mut Report,
) -> Result<Vec<NotificationDraft>, DomainError> {
    // Delegation never changes status; the window closes once work starts.
    if report.status != ReportStatus::Assigned {
        return Err(DomainError::DelegationWindowClosed {
            status: report.status,
        });
    }

    let delegating_officer: bool = report.is_delegating_officer(actor.user_id, &actor.roles);
    let redelegating_maintainer: bool = context.policy.allow_maintainer_redelegation
        && actor.roles.has_role(Role::ExternalMaintainer)
        && report.external_handler.is_some()
        && context.current_external_users.contains(&actor.user_id);
    if !delegating_officer && !redelegating_maintainer {
        return Err(DomainError::NotReportHandler {
            action: String::from("assign_external"),
            user_id: actor.user_id,
        });
    }

    if report.external_handler == Some(handler) {
        return Err(DomainError::AlreadyDelegated {
            handler: handler.to_string(),
        });
    }

    let target = context
        .eligible_externals
        .iter()
        .find(|candidate| candidate.admits(&handler))
        .ok_or_else(|| DomainError::IneligibleExternal {
            handler: handler.to_string(),
        })?;

    report.external_handler = Some(handler);

    let mut recipients: Vec<i64> = target.recipients_for(&handler);
    recipients.sort_unstable();
    recipients.dedup();
    Ok(recipients
        .into_iter()
        .map(|recipient| notifications::external_assigned(report, recipient))
        .collect())
}

fn update_status(
    actor: &Actor,
    target: ReportStatus,
    context: &TransitionContext,
    report: &mut Report,
) -> Result<Vec<NotificationDraft>, DomainError> {
    if !target.is_operator_target() {
        return Err(DomainError::InvalidTargetStatus(target));
    }
    report.status.validate_transition(target)?;

    let handler: bool = report.is_assigned_to(actor.user_id)
        || context.current_external_users.contains(&actor.user_id);
    if !handler {
        return Err(DomainError::NotReportHandler {
            action: String::from("update_status"),
            user_id: actor.user_id,
        });
    }

    let from: ReportStatus = report.status;
    report.status = target;

    Ok(vec![notifications::status_changed(report, from, target)])
}
