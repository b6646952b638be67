// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use participium::{AssignmentPolicy, EligibleExternal};
use participium_domain::{ExternalHandler, NotificationType, ReportStatus};

use super::helpers::{
    World, create_assigned_report, create_valid_request, create_world, notification_total,
    submit_report,
};
use crate::{
    ApiError, ApproveReportRequest, AssignExternalRequest, RejectReportRequest,
    TransitionResponse, UpdateStatusRequest, approve_report, assign_external,
    list_assignable_externals, list_assignable_technicals, reject_report, update_status,
};

fn approve_as_pr(
    world: &mut World,
    report_id: i64,
    technical_id: i64,
) -> Result<TransitionResponse, ApiError> {
    let pr = world.public_relations.clone();
    approve_report(
        &mut world.persistence,
        &pr,
        report_id,
        ApproveReportRequest {
            assigned_technical_id: technical_id,
        },
        AssignmentPolicy::default(),
    )
}

fn delegate(
    world: &mut World,
    caller: &crate::AuthenticatedActor,
    report_id: i64,
    handler: ExternalHandler,
    policy: AssignmentPolicy,
) -> Result<TransitionResponse, ApiError> {
    assign_external(
        &mut world.persistence,
        caller,
        report_id,
        AssignExternalRequest { handler },
        policy,
    )
}

fn set_status(
    world: &mut World,
    caller: &crate::AuthenticatedActor,
    report_id: i64,
    status: &str,
) -> Result<TransitionResponse, ApiError> {
    update_status(
        &mut world.persistence,
        caller,
        report_id,
        UpdateStatusRequest {
            status: status.to_string(),
        },
        AssignmentPolicy::default(),
    )
}

#[test]
fn test_approve_assigns_and_writes_two_notifications() {
    let mut world = create_world();
    let report_id = submit_report(&mut world, create_valid_request()).unwrap();
    let officer = world.lighting_officer.user_id;
    let before = notification_total(&mut world);

    let response = approve_as_pr(&mut world, report_id, officer).unwrap();

    assert_eq!(response.status, ReportStatus::Assigned);
    assert_eq!(response.assigned_to_id, Some(officer));
    assert_eq!(response.version, 1);
    assert_eq!(response.notifications_created, 2);
    assert_eq!(notification_total(&mut world) - before, 2);

    let citizen_inbox = world
        .persistence
        .list_notifications(world.citizen.user_id, false, None)
        .unwrap();
    assert_eq!(citizen_inbox.len(), 1);
    assert_eq!(citizen_inbox[0].notification_type, NotificationType::Approved);
    let officer_inbox = world
        .persistence
        .list_notifications(officer, false, None)
        .unwrap();
    assert_eq!(officer_inbox.len(), 1);
    assert_eq!(officer_inbox[0].notification_type, NotificationType::Assigned);
}

#[test]
fn test_approve_to_officer_of_other_category_is_ineligible() {
    let mut world = create_world();
    let report_id = submit_report(&mut world, create_valid_request()).unwrap();
    let waste_officer = world.waste_officer.user_id;
    let before = notification_total(&mut world);

    let err = approve_as_pr(&mut world, report_id, waste_officer).unwrap_err();

    assert_eq!(err.kind(), "ineligible_assignee");
    assert_eq!(notification_total(&mut world), before);
    assert_eq!(
        world.persistence.get_report(report_id).unwrap().status,
        ReportStatus::PendingApproval
    );
}

#[test]
fn test_approve_requires_public_relations() {
    let mut world = create_world();
    let report_id = submit_report(&mut world, create_valid_request()).unwrap();
    let officer = world.lighting_officer.clone();

    let err = approve_report(
        &mut world.persistence,
        &officer,
        report_id,
        ApproveReportRequest {
            assigned_technical_id: officer.user_id,
        },
        AssignmentPolicy::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_second_approve_sees_invalid_transition() {
    let mut world = create_world();
    let report_id = submit_report(&mut world, create_valid_request()).unwrap();
    let first = world.lighting_officer.user_id;
    let second = world.second_lighting_officer.user_id;

    approve_as_pr(&mut world, report_id, first).unwrap();
    let err = approve_as_pr(&mut world, report_id, second).unwrap_err();

    assert_eq!(err.kind(), "invalid_transition");
    assert_eq!(
        world.persistence.get_report(report_id).unwrap().assigned_to_id,
        Some(first)
    );
}

#[test]
fn test_approve_unknown_report_is_not_found() {
    let mut world = create_world();
    let officer = world.lighting_officer.user_id;

    let err = approve_as_pr(&mut world, 999, officer).unwrap_err();

    assert_eq!(err.kind(), "not_found");
}

#[test]
fn test_reject_is_terminal() {
    let mut world = create_world();
    let report_id = submit_report(&mut world, create_valid_request()).unwrap();
    let pr = world.public_relations.clone();
    let officer = world.lighting_officer.user_id;

    let response = reject_report(
        &mut world.persistence,
        &pr,
        report_id,
        RejectReportRequest {
            reason: String::from("Duplicate of report 3"),
        },
    )
    .unwrap();
    assert_eq!(response.status, ReportStatus::Rejected);
    assert_eq!(response.notifications_created, 1);

    let report = world.persistence.get_report(report_id).unwrap();
    assert_eq!(
        report.rejected_reason.as_deref(),
        Some("Duplicate of report 3")
    );

    let err = approve_as_pr(&mut world, report_id, officer).unwrap_err();
    assert_eq!(err.kind(), "invalid_transition");
    let again = reject_report(
        &mut world.persistence,
        &pr,
        report_id,
        RejectReportRequest {
            reason: String::from("Still a duplicate"),
        },
    )
    .unwrap_err();
    assert_eq!(again.kind(), "invalid_transition");
}

#[test]
fn test_reject_reason_is_stored_verbatim() {
    let mut world = create_world();
    let report_id = submit_report(&mut world, create_valid_request()).unwrap();
    let pr = world.public_relations.clone();
    let reason = "  Duplicate of report 12\n  see the photo  ";

    reject_report(
        &mut world.persistence,
        &pr,
        report_id,
        RejectReportRequest {
            reason: String::from(reason),
        },
    )
    .unwrap();

    let report = world.persistence.get_report(report_id).unwrap();
    assert_eq!(report.rejected_reason.as_deref(), Some(reason));
}

#[test]
fn test_reject_requires_reason() {
    let mut world = create_world();
    let report_id = submit_report(&mut world, create_valid_request()).unwrap();
    let pr = world.public_relations.clone();

    let err = reject_report(
        &mut world.persistence,
        &pr,
        report_id,
        RejectReportRequest {
            reason: String::from("  "),
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "reason"));
}

#[test]
fn test_delegation_window_closes_once_work_starts() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let company_id = world.company_id;

    set_status(&mut world, &officer, report_id, "IN_PROGRESS").unwrap();
    let err = delegate(
        &mut world,
        &officer,
        report_id,
        ExternalHandler::Company {
            external_company_id: company_id,
            technician_id: None,
        },
        AssignmentPolicy::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), "invalid_transition");
}

#[test]
fn test_company_delegation_notifies_whole_roster() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let company_id = world.company_id;
    let before = notification_total(&mut world);

    let response = delegate(
        &mut world,
        &officer,
        report_id,
        ExternalHandler::Company {
            external_company_id: company_id,
            technician_id: None,
        },
        AssignmentPolicy::default(),
    )
    .unwrap();

    assert_eq!(response.status, ReportStatus::Assigned);
    assert_eq!(response.assigned_to_id, Some(officer.user_id));
    assert_eq!(response.notifications_created, 2);
    assert_eq!(notification_total(&mut world) - before, 2);
    for technician in [world.technician_a.user_id, world.technician_b.user_id] {
        assert_eq!(world.persistence.count_notifications(technician).unwrap(), 1);
    }
}

#[test]
fn test_named_technician_delegation_notifies_one() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let handler = ExternalHandler::Company {
        external_company_id: world.company_id,
        technician_id: Some(world.technician_b.user_id),
    };

    let response = delegate(
        &mut world,
        &officer,
        report_id,
        handler,
        AssignmentPolicy::default(),
    )
    .unwrap();

    assert_eq!(response.notifications_created, 1);
    assert_eq!(
        world
            .persistence
            .count_notifications(world.technician_a.user_id)
            .unwrap(),
        0
    );
}

#[test]
fn test_company_without_platform_access_is_ineligible() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let handler = ExternalHandler::Company {
        external_company_id: world.offline_company_id,
        technician_id: None,
    };

    let err = delegate(
        &mut world,
        &officer,
        report_id,
        handler,
        AssignmentPolicy::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), "ineligible_assignee");
}

#[test]
fn test_only_assigned_officer_may_delegate() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let other_officer = world.second_lighting_officer.clone();
    let handler = ExternalHandler::User {
        external_maintainer_id: world.maintainer.user_id,
    };

    let err = delegate(
        &mut world,
        &other_officer,
        report_id,
        handler,
        AssignmentPolicy::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_delegating_twice_to_same_handler_fails() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let handler = ExternalHandler::User {
        external_maintainer_id: world.maintainer.user_id,
    };

    delegate(&mut world, &officer, report_id, handler, AssignmentPolicy::default()).unwrap();
    let err = delegate(&mut world, &officer, report_id, handler, AssignmentPolicy::default())
        .unwrap_err();

    assert_eq!(err.kind(), "invalid_transition");
}

#[test]
fn test_maintainer_redelegation_follows_policy() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let maintainer = world.maintainer.clone();
    let to_company = ExternalHandler::Company {
        external_company_id: world.company_id,
        technician_id: None,
    };
    delegate(
        &mut world,
        &officer,
        report_id,
        ExternalHandler::User {
            external_maintainer_id: maintainer.user_id,
        },
        AssignmentPolicy::default(),
    )
    .unwrap();

    let denied = delegate(
        &mut world,
        &maintainer,
        report_id,
        to_company,
        AssignmentPolicy::default(),
    )
    .unwrap_err();
    assert!(matches!(denied, ApiError::Unauthorized { .. }));

    let policy = AssignmentPolicy {
        allow_maintainer_redelegation: true,
        ..AssignmentPolicy::default()
    };
    let response = delegate(&mut world, &maintainer, report_id, to_company, policy).unwrap();
    assert_eq!(response.external_handler, Some(to_company));
}

#[test]
fn test_external_technician_drives_status_after_delegation() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let technician = world.technician_a.clone();
    let company_id = world.company_id;
    delegate(
        &mut world,
        &officer,
        report_id,
        ExternalHandler::Company {
            external_company_id: company_id,
            technician_id: None,
        },
        AssignmentPolicy::default(),
    )
    .unwrap();
    let citizen_before = world
        .persistence
        .count_notifications(world.citizen.user_id)
        .unwrap();

    let response = set_status(&mut world, &technician, report_id, "IN_PROGRESS").unwrap();
    assert_eq!(response.status, ReportStatus::InProgress);
    assert_eq!(response.notifications_created, 1);
    assert_eq!(
        world
            .persistence
            .count_notifications(world.citizen.user_id)
            .unwrap(),
        citizen_before + 1
    );

    set_status(&mut world, &technician, report_id, "SUSPENDED").unwrap();
    set_status(&mut world, &technician, report_id, "IN_PROGRESS").unwrap();
    let done = set_status(&mut world, &technician, report_id, "RESOLVED").unwrap();
    assert_eq!(done.status, ReportStatus::Resolved);
    assert_eq!(done.version, 6);
}

#[test]
fn test_status_update_rules() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let stranger = world.waste_officer.clone();

    let back_to_assigned = set_status(&mut world, &officer, report_id, "ASSIGNED").unwrap_err();
    assert!(matches!(back_to_assigned, ApiError::Validation { .. }));

    let unknown = set_status(&mut world, &officer, report_id, "DONE").unwrap_err();
    assert_eq!(unknown.kind(), "validation_error");

    let not_handler = set_status(&mut world, &stranger, report_id, "IN_PROGRESS").unwrap_err();
    assert!(matches!(not_handler, ApiError::Unauthorized { .. }));

    set_status(&mut world, &officer, report_id, "IN_PROGRESS").unwrap();
    let no_op = set_status(&mut world, &officer, report_id, "IN_PROGRESS").unwrap_err();
    assert_eq!(no_op.kind(), "invalid_transition");
}

#[test]
fn test_assignable_technicals_are_category_officers() {
    let mut world = create_world();
    let report_id = submit_report(&mut world, create_valid_request()).unwrap();
    let pr = world.public_relations.clone();

    let response = list_assignable_technicals(
        &mut world.persistence,
        &pr,
        report_id,
        AssignmentPolicy::default(),
    )
    .unwrap();

    let ids: Vec<i64> = response.technicals.iter().map(|t| t.user_id).collect();
    assert_eq!(
        ids,
        vec![
            world.lighting_officer.user_id,
            world.second_lighting_officer.user_id
        ]
    );

    let citizen = world.citizen.clone();
    assert!(
        list_assignable_technicals(
            &mut world.persistence,
            &citizen,
            report_id,
            AssignmentPolicy::default()
        )
        .is_err()
    );
}

#[test]
fn test_assignable_externals_for_assigned_officer() {
    let mut world = create_world();
    let report_id = create_assigned_report(&mut world);
    let officer = world.lighting_officer.clone();
    let pr = world.public_relations.clone();

    let response = list_assignable_externals(
        &mut world.persistence,
        &officer,
        report_id,
        AssignmentPolicy::default(),
    )
    .unwrap();

    assert_eq!(response.externals.len(), 2);
    match &response.externals[0] {
        EligibleExternal::Company {
            company_id,
            technicians,
            ..
        } => {
            assert_eq!(*company_id, world.company_id);
            assert_eq!(technicians.len(), 2);
        }
        other => panic!("expected the company first, got {other:?}"),
    }
    assert!(matches!(
        response.externals[1],
        EligibleExternal::User { user_id, .. } if user_id == world.maintainer.user_id
    ));

    let err = list_assignable_externals(
        &mut world.persistence,
        &pr,
        report_id,
        AssignmentPolicy::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}
