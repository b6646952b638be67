// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod transition_tests;

use crate::{NewCompany, NewUser, Persistence};
use participium::{Actor, AssignmentPolicy, TransitionContext};
use participium_domain::{
    Coordinates, NewReport, NewReportPhoto, ReportCategory, RoleSet, UserAccount,
};

/// Ids of the directory created by `seed_directory`.
pub struct Directory {
    pub citizen: i64,
    pub other_citizen: i64,
    pub public_relations: i64,
    pub lighting_officer: i64,
    pub waste_officer: i64,
    pub maintainer: i64,
    pub company: i64,
    pub technician_a: i64,
    pub technician_b: i64,
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_user(
    persistence: &mut Persistence,
    username: &str,
    roles: &[&str],
    company_id: Option<i64>,
) -> i64 {
    persistence
        .create_user(&NewUser {
            username: username.to_string(),
            display_name: format!("{username} display"),
            roles: RoleSet::parse(roles).unwrap(),
            company_id,
        })
        .unwrap()
}

/// Citizens, a PR officer, two technical officers, an independent
/// maintainer registered for public lighting, and a lighting company with
/// two technicians.
pub fn seed_directory(persistence: &mut Persistence) -> Directory {
    let citizen = create_test_user(persistence, "mario", &["CITIZEN"], None);
    let other_citizen = create_test_user(persistence, "giulia", &["CITIZEN"], None);
    let public_relations =
        create_test_user(persistence, "pr_officer", &["PUBLIC_RELATIONS"], None);
    let lighting_officer = create_test_user(
        persistence,
        "lighting",
        &["PUBLIC_LIGHTING_OFFICER"],
        None,
    );
    let waste_officer =
        create_test_user(persistence, "waste", &["WASTE_MANAGEMENT_OFFICER"], None);
    let maintainer = create_test_user(persistence, "freelancer", &["EXTERNAL_MAINTAINER"], None);
    persistence
        .register_maintainer_category(maintainer, ReportCategory::PublicLighting)
        .unwrap();

    let company = persistence
        .create_company(&NewCompany {
            name: String::from("Luce Srl"),
            categories: vec![ReportCategory::PublicLighting],
            has_platform_access: true,
        })
        .unwrap();
    let technician_a = create_test_user(
        persistence,
        "tech_a",
        &["EXTERNAL_MAINTAINER"],
        Some(company),
    );
    let technician_b = create_test_user(
        persistence,
        "tech_b",
        &["EXTERNAL_MAINTAINER"],
        Some(company),
    );

    Directory {
        citizen,
        other_citizen,
        public_relations,
        lighting_officer,
        waste_officer,
        maintainer,
        company,
        technician_a,
        technician_b,
    }
}

pub fn create_test_new_report(user_id: i64) -> NewReport {
    NewReport {
        user_id,
        title: String::from("Street lamp out"),
        description: String::from("The lamp in front of number 12 has been dark for a week"),
        category: ReportCategory::PublicLighting,
        coordinates: Coordinates::new(45.0703, 7.6869),
        address: String::from("Via Roma 12, Torino"),
        is_anonymous: false,
        photos: vec![NewReportPhoto {
            url: String::from("/uploads/lamp.jpg"),
            filename: String::from("lamp.jpg"),
        }],
    }
}

pub fn actor_for(persistence: &mut Persistence, user_id: i64) -> Actor {
    let account: UserAccount = persistence.get_user(user_id).unwrap();
    Actor::new(account.user_id, account.roles)
}

pub fn context_with_technicals(technicals: Vec<i64>) -> TransitionContext {
    TransitionContext {
        eligible_technicals: technicals,
        policy: AssignmentPolicy::default(),
        ..TransitionContext::default()
    }
}
