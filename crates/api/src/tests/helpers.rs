// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use participium::AssignmentPolicy;
use participium_domain::{ReportCategory, RoleSet, ServiceArea};
use participium_persistence::{NewCompany, NewUser, Persistence};

use crate::{
    ApiError, ApproveReportRequest, AuthenticatedActor, CreateReportRequest,
    FallbackAddressResolver, PhotoStorage, PhotoUpload, StoredPhoto, authenticate_user,
    approve_report, create_report,
};

/// Keeps uploads in memory and hands out sequential names.
#[derive(Default)]
pub struct MemoryPhotoStorage {
    pub stored: Mutex<Vec<String>>,
    /// The 1-based `store` call that fails, if any.
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
}

impl MemoryPhotoStorage {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }
}

impl PhotoStorage for MemoryPhotoStorage {
    fn store(&self, upload: &PhotoUpload) -> Result<StoredPhoto, ApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(ApiError::Internal {
                message: format!("disk full while writing {}", upload.original_name),
            });
        }
        let filename = format!("photo-{call}-{}", upload.original_name);
        self.stored.lock().unwrap().push(filename.clone());
        Ok(StoredPhoto {
            url: format!("/uploads/{filename}"),
            filename,
        })
    }

    fn discard(&self, photo: &StoredPhoto) {
        self.stored
            .lock()
            .unwrap()
            .retain(|filename| *filename != photo.filename);
    }
}

/// The seeded directory, as authenticated actors.
pub struct World {
    pub persistence: Persistence,
    pub admin: AuthenticatedActor,
    pub citizen: AuthenticatedActor,
    pub other_citizen: AuthenticatedActor,
    pub public_relations: AuthenticatedActor,
    pub lighting_officer: AuthenticatedActor,
    pub second_lighting_officer: AuthenticatedActor,
    pub waste_officer: AuthenticatedActor,
    pub maintainer: AuthenticatedActor,
    pub company_id: i64,
    pub offline_company_id: i64,
    pub technician_a: AuthenticatedActor,
    pub technician_b: AuthenticatedActor,
}

fn create_account(
    persistence: &mut Persistence,
    username: &str,
    roles: &[&str],
    company_id: Option<i64>,
) -> AuthenticatedActor {
    let user_id: i64 = persistence
        .create_user(&NewUser {
            username: username.to_string(),
            display_name: format!("{username} display"),
            roles: RoleSet::parse(roles).unwrap(),
            company_id,
        })
        .unwrap();
    authenticate_user(persistence, user_id).unwrap()
}

pub fn create_world() -> World {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let admin = create_account(&mut persistence, "admin", &["ADMINISTRATOR"], None);
    let citizen = create_account(&mut persistence, "mario", &["CITIZEN"], None);
    let other_citizen = create_account(&mut persistence, "giulia", &["CITIZEN"], None);
    let public_relations =
        create_account(&mut persistence, "pr_officer", &["PUBLIC_RELATIONS"], None);
    let lighting_officer = create_account(
        &mut persistence,
        "lighting",
        &["PUBLIC_LIGHTING_OFFICER"],
        None,
    );
    let second_lighting_officer = create_account(
        &mut persistence,
        "lighting_two",
        &["PUBLIC_LIGHTING_OFFICER"],
        None,
    );
    let waste_officer = create_account(
        &mut persistence,
        "waste",
        &["WASTE_MANAGEMENT_OFFICER"],
        None,
    );
    let maintainer = create_account(
        &mut persistence,
        "freelancer",
        &["EXTERNAL_MAINTAINER"],
        None,
    );
    persistence
        .register_maintainer_category(maintainer.user_id, ReportCategory::PublicLighting)
        .unwrap();

    let company_id = persistence
        .create_company(&NewCompany {
            name: String::from("Luce Srl"),
            categories: vec![ReportCategory::PublicLighting],
            has_platform_access: true,
        })
        .unwrap();
    let offline_company_id = persistence
        .create_company(&NewCompany {
            name: String::from("Lampioni Offline"),
            categories: vec![ReportCategory::PublicLighting],
            has_platform_access: false,
        })
        .unwrap();
    let technician_a = create_account(
        &mut persistence,
        "tech_a",
        &["EXTERNAL_MAINTAINER"],
        Some(company_id),
    );
    let technician_b = create_account(
        &mut persistence,
        "tech_b",
        &["EXTERNAL_MAINTAINER"],
        Some(company_id),
    );

    World {
        persistence,
        admin,
        citizen,
        other_citizen,
        public_relations,
        lighting_officer,
        second_lighting_officer,
        waste_officer,
        maintainer,
        company_id,
        offline_company_id,
        technician_a,
        technician_b,
    }
}

pub fn create_test_photo(name: &str) -> PhotoUpload {
    PhotoUpload {
        original_name: name.to_string(),
        content_type: Some(String::from("image/jpeg")),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

/// A lighting report inside the Turin boundary.
pub fn create_valid_request() -> CreateReportRequest {
    CreateReportRequest {
        title: String::from("Street lamp out"),
        description: String::from("The lamp in front of number 12 has been dark for a week"),
        category: String::from("PUBLIC_LIGHTING"),
        latitude: 45.0703,
        longitude: 7.6869,
        is_anonymous: false,
        photos: vec![create_test_photo("lamp.jpg")],
    }
}

pub fn submit_report(world: &mut World, request: CreateReportRequest) -> Result<i64, ApiError> {
    let citizen = world.citizen.clone();
    create_report(
        &mut world.persistence,
        &citizen,
        request,
        &ServiceArea::turin(),
        &MemoryPhotoStorage::default(),
        &FallbackAddressResolver,
    )
    .map(|response| response.report_id)
}

/// Files a report and approves it to the first lighting officer.
pub fn create_assigned_report(world: &mut World) -> i64 {
    let report_id = submit_report(world, create_valid_request()).unwrap();
    let pr = world.public_relations.clone();
    let officer = world.lighting_officer.user_id;
    approve_report(
        &mut world.persistence,
        &pr,
        report_id,
        ApproveReportRequest {
            assigned_technical_id: officer,
        },
        AssignmentPolicy::default(),
    )
    .unwrap();
    report_id
}

pub fn notification_total(world: &mut World) -> i64 {
    let ids: Vec<i64> = [
        &world.admin,
        &world.citizen,
        &world.other_citizen,
        &world.public_relations,
        &world.lighting_officer,
        &world.second_lighting_officer,
        &world.waste_officer,
        &world.maintainer,
        &world.technician_a,
        &world.technician_b,
    ]
    .iter()
    .map(|actor| actor.user_id)
    .collect();
    ids.into_iter()
        .map(|id| world.persistence.count_notifications(id).unwrap())
        .sum()
}
