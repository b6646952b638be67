// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persisting lifecycle transitions computed by the core engine.

use super::{
    Directory, actor_for, context_with_technicals, create_test_new_report,
    create_test_persistence, seed_directory,
};
use crate::{Persistence, PersistenceError, ReportFilter};
use participium::{Command, EligibleExternal, EligibleTechnician, TransitionContext, apply};
use participium_domain::{ExternalHandler, NotificationType, ReportCategory, ReportStatus};

fn approve(persistence: &mut Persistence, directory: &Directory, report_id: i64) {
    let report = persistence.get_report(report_id).unwrap();
    let actor = actor_for(persistence, directory.public_relations);
    let result = apply(
        &report,
        &actor,
        Command::Approve {
            assigned_technical_id: directory.lighting_officer,
        },
        &context_with_technicals(vec![directory.lighting_officer]),
    )
    .unwrap();
    persistence.persist_transition(&result).unwrap();
}

fn company_context(directory: &Directory) -> TransitionContext {
    TransitionContext {
        eligible_externals: vec![EligibleExternal::Company {
            company_id: directory.company,
            name: String::from("Luce Srl"),
            technicians: vec![
                EligibleTechnician {
                    user_id: directory.technician_a,
                    display_name: String::from("tech_a display"),
                },
                EligibleTechnician {
                    user_id: directory.technician_b,
                    display_name: String::from("tech_b display"),
                },
            ],
        }],
        ..TransitionContext::default()
    }
}

#[test]
fn test_approve_writes_report_and_two_notifications() {
    let mut persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence);
    let report_id = persistence
        .create_report(&create_test_new_report(directory.citizen))
        .unwrap();

    let report = persistence.get_report(report_id).unwrap();
    let actor = actor_for(&mut persistence, directory.public_relations);
    let result = apply(
        &report,
        &actor,
        Command::Approve {
            assigned_technical_id: directory.lighting_officer,
        },
        &context_with_technicals(vec![directory.lighting_officer]),
    )
    .unwrap();
    let persisted = persistence.persist_transition(&result).unwrap();

    assert_eq!(persisted.report_id, report_id);
    assert_eq!(persisted.version, 1);
    assert_eq!(persisted.notification_ids.len(), 2);

    let stored = persistence.get_report(report_id).unwrap();
    assert_eq!(stored.status, ReportStatus::Assigned);
    assert_eq!(stored.assigned_to_id, Some(directory.lighting_officer));
    assert_eq!(stored.version, 1);
    assert_eq!(stored.photos.len(), 1);

    let citizen = persistence
        .list_notifications(directory.citizen, false, None)
        .unwrap();
    assert_eq!(citizen.len(), 1);
    assert_eq!(citizen[0].notification_type, NotificationType::Approved);
    assert_eq!(citizen[0].report_id, Some(report_id));

    let officer = persistence
        .list_notifications(directory.lighting_officer, false, None)
        .unwrap();
    assert_eq!(officer.len(), 1);
    assert_eq!(officer[0].notification_type, NotificationType::Assigned);
}

#[test]
fn test_stale_transition_writes_nothing() {
    let mut persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence);
    let report_id = persistence
        .create_report(&create_test_new_report(directory.citizen))
        .unwrap();

    let report = persistence.get_report(report_id).unwrap();
    let actor = actor_for(&mut persistence, directory.public_relations);
    let context = context_with_technicals(vec![directory.lighting_officer]);

    // Both callers read the same pending report.
    let first = apply(
        &report,
        &actor,
        Command::Approve {
            assigned_technical_id: directory.lighting_officer,
        },
        &context,
    )
    .unwrap();
    let second = apply(
        &report,
        &actor,
        Command::Reject {
            reason: String::from("Duplicate"),
        },
        &context,
    )
    .unwrap();

    persistence.persist_transition(&first).unwrap();
    let before = persistence.count_notifications(directory.citizen).unwrap();

    let stale = persistence.persist_transition(&second);
    assert_eq!(
        stale,
        Err(PersistenceError::StaleReport {
            report_id,
            expected_version: 0,
        })
    );

    let stored = persistence.get_report(report_id).unwrap();
    assert_eq!(stored.status, ReportStatus::Assigned);
    assert_eq!(stored.rejected_reason, None);
    assert_eq!(
        persistence.count_notifications(directory.citizen).unwrap(),
        before
    );
}

#[test]
fn test_reject_stores_reason() {
    let mut persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence);
    let report_id = persistence
        .create_report(&create_test_new_report(directory.citizen))
        .unwrap();

    let report = persistence.get_report(report_id).unwrap();
    let actor = actor_for(&mut persistence, directory.public_relations);
    let result = apply(
        &report,
        &actor,
        Command::Reject {
            reason: String::from("Outside municipal responsibility"),
        },
        &TransitionContext::default(),
    )
    .unwrap();
    persistence.persist_transition(&result).unwrap();

    let stored = persistence.get_report(report_id).unwrap();
    assert_eq!(stored.status, ReportStatus::Rejected);
    assert_eq!(
        stored.rejected_reason.as_deref(),
        Some("Outside municipal responsibility")
    );

    let notifications = persistence
        .list_notifications(directory.citizen, false, None)
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].notification_type, NotificationType::Rejected);
    assert!(
        notifications[0]
            .message
            .contains("Outside municipal responsibility")
    );
}

#[test]
fn test_company_delegation_round_trips_and_notifies_roster() {
    let mut persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence);
    let report_id = persistence
        .create_report(&create_test_new_report(directory.citizen))
        .unwrap();
    approve(&mut persistence, &directory, report_id);

    let report = persistence.get_report(report_id).unwrap();
    let officer = actor_for(&mut persistence, directory.lighting_officer);
    let handler = ExternalHandler::Company {
        external_company_id: directory.company,
        technician_id: None,
    };
    let result = apply(
        &report,
        &officer,
        Command::AssignToExternal {
            handler: handler.clone(),
        },
        &company_context(&directory),
    )
    .unwrap();
    let persisted = persistence.persist_transition(&result).unwrap();
    assert_eq!(persisted.notification_ids.len(), 2);

    let stored = persistence.get_report(report_id).unwrap();
    assert_eq!(stored.status, ReportStatus::Assigned);
    assert_eq!(stored.assigned_to_id, Some(directory.lighting_officer));
    assert_eq!(stored.external_handler, Some(handler));
    assert_eq!(stored.version, 2);

    for technician in [directory.technician_a, directory.technician_b] {
        let inbox = persistence.list_notifications(technician, false, None).unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].notification_type, NotificationType::Assigned);

        let handled = persistence
            .list_reports_handled_by(technician, Some(directory.company))
            .unwrap();
        assert_eq!(handled.len(), 1);
        assert_eq!(handled[0].report_id, report_id);
    }
}

#[test]
fn test_named_technician_handles_report_alone() {
    let mut persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence);
    let report_id = persistence
        .create_report(&create_test_new_report(directory.citizen))
        .unwrap();
    approve(&mut persistence, &directory, report_id);

    let report = persistence.get_report(report_id).unwrap();
    let officer = actor_for(&mut persistence, directory.lighting_officer);
    let result = apply(
        &report,
        &officer,
        Command::AssignToExternal {
            handler: ExternalHandler::Company {
                external_company_id: directory.company,
                technician_id: Some(directory.technician_b),
            },
        },
        &company_context(&directory),
    )
    .unwrap();
    persistence.persist_transition(&result).unwrap();

    assert!(
        persistence
            .list_reports_handled_by(directory.technician_a, Some(directory.company))
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        persistence
            .list_reports_handled_by(directory.technician_b, Some(directory.company))
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        persistence
            .list_reports_handled_by(directory.lighting_officer, None)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_status_update_and_previous_handlers() {
    let mut persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence);
    let report_id = persistence
        .create_report(&create_test_new_report(directory.citizen))
        .unwrap();
    approve(&mut persistence, &directory, report_id);

    let report = persistence.get_report(report_id).unwrap();
    let officer = actor_for(&mut persistence, directory.lighting_officer);
    let result = apply(
        &report,
        &officer,
        Command::UpdateStatus {
            target: ReportStatus::InProgress,
        },
        &TransitionContext::default(),
    )
    .unwrap();
    persistence.persist_transition(&result).unwrap();

    let stored = persistence.get_report(report_id).unwrap();
    assert_eq!(stored.status, ReportStatus::InProgress);
    assert!(stored.updated_at >= stored.created_at);

    let latest = persistence
        .list_notifications(directory.citizen, false, Some(1))
        .unwrap();
    assert_eq!(latest[0].notification_type, NotificationType::StatusChanged);

    let previous = persistence
        .list_previous_handlers(ReportCategory::PublicLighting)
        .unwrap();
    assert_eq!(previous.len(), 1);
    assert_eq!(previous[0].user_id, directory.lighting_officer);

    let public = persistence
        .list_reports(&ReportFilter::with_statuses(&[
            ReportStatus::Assigned,
            ReportStatus::InProgress,
            ReportStatus::Suspended,
            ReportStatus::Resolved,
        ]))
        .unwrap();
    assert_eq!(public.len(), 1);
}
