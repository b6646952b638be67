// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Actor, AssignmentPolicy, EligibleExternal, EligibleTechnician, TransitionContext,
};
use participium_domain::{
    Coordinates, ExternalHandler, Report, ReportCategory, ReportStatus, RoleSet, UserAccount,
};

pub const CITIZEN_ID: i64 = 1;
pub const PR_ID: i64 = 2;
pub const LIGHTING_OFFICER_ID: i64 = 3;
pub const WASTE_OFFICER_ID: i64 = 4;
pub const MAINTAINER_ID: i64 = 5;
pub const TECHNICIAN_A_ID: i64 = 6;
pub const TECHNICIAN_B_ID: i64 = 7;
pub const OTHER_MAINTAINER_ID: i64 = 8;
pub const COMPANY_ID: i64 = 10;

pub fn roles(names: &[&str]) -> RoleSet {
    RoleSet::parse(names).unwrap()
}

pub fn account(user_id: i64, names: &[&str], company_id: Option<i64>) -> UserAccount {
    UserAccount {
        user_id,
        username: format!("user{user_id}"),
        display_name: format!("User {user_id}"),
        roles: roles(names),
        company_id,
    }
}

pub fn citizen() -> Actor {
    Actor::new(CITIZEN_ID, roles(&["CITIZEN"]))
}

pub fn public_relations() -> Actor {
    Actor::new(PR_ID, roles(&["PUBLIC_RELATIONS"]))
}

pub fn lighting_officer() -> Actor {
    Actor::new(LIGHTING_OFFICER_ID, roles(&["PUBLIC_LIGHTING_OFFICER"]))
}

pub fn waste_officer() -> Actor {
    Actor::new(WASTE_OFFICER_ID, roles(&["WASTE_MANAGEMENT_OFFICER"]))
}

pub fn maintainer() -> Actor {
    Actor::new(MAINTAINER_ID, roles(&["EXTERNAL_MAINTAINER"]))
}

/// A public lighting report owned by `CITIZEN_ID`.
pub fn create_test_report(status: ReportStatus) -> Report {
    let assigned: bool = !matches!(
        status,
        ReportStatus::PendingApproval | ReportStatus::Rejected
    );
    Report {
        report_id: 100,
        user_id: CITIZEN_ID,
        title: String::from("Street lamp out"),
        description: String::from("The lamp in front of number 12 is dark"),
        category: ReportCategory::PublicLighting,
        coordinates: Coordinates::new(45.0703, 7.6869),
        address: String::from("Via Roma 12"),
        is_anonymous: false,
        status,
        assigned_to_id: assigned.then_some(LIGHTING_OFFICER_ID),
        external_handler: None,
        rejected_reason: (status == ReportStatus::Rejected).then(|| String::from("Duplicate")),
        version: 3,
        created_at: String::from("2026-01-10T09:00:00Z"),
        updated_at: String::from("2026-01-10T09:00:00Z"),
        photos: Vec::new(),
    }
}

pub fn delegated_to_maintainer(mut report: Report) -> Report {
    report.external_handler = Some(ExternalHandler::User {
        external_maintainer_id: MAINTAINER_ID,
    });
    report
}

pub fn create_test_context() -> TransitionContext {
    TransitionContext {
        eligible_technicals: vec![LIGHTING_OFFICER_ID],
        eligible_externals: vec![
            EligibleExternal::Company {
                company_id: COMPANY_ID,
                name: String::from("Luce Srl"),
                technicians: vec![
                    EligibleTechnician {
                        user_id: TECHNICIAN_A_ID,
                        display_name: String::from("Technician A"),
                    },
                    EligibleTechnician {
                        user_id: TECHNICIAN_B_ID,
                        display_name: String::from("Technician B"),
                    },
                ],
            },
            EligibleExternal::User {
                user_id: MAINTAINER_ID,
                display_name: String::from("Independent Maintainer"),
            },
            EligibleExternal::User {
                user_id: OTHER_MAINTAINER_ID,
                display_name: String::from("Second Maintainer"),
            },
        ],
        current_external_users: Vec::new(),
        policy: AssignmentPolicy::default(),
    }
}
