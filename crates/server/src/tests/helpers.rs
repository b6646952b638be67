// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the HTTP tests.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use participium::AssignmentPolicy;
use participium_api::FallbackAddressResolver;
use participium_domain::{ReportCategory, RoleSet, ServiceArea};
use participium_persistence::{NewCompany, NewUser, Persistence};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::session::USER_ID_HEADER;
use crate::storage::DiskPhotoStorage;
use crate::{AppState, build_router};

const BOUNDARY: &str = "participium-test-boundary";

/// A router over a seeded in-memory directory.
pub struct TestServer {
    pub app: Router,
    pub state: AppState,
    pub citizen: i64,
    pub public_relations: i64,
    pub lighting_officer: i64,
    pub waste_officer: i64,
    pub technician: i64,
    pub company_id: i64,
}

fn seed_user(
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

pub fn create_test_server() -> TestServer {
    let mut persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let citizen = seed_user(&mut persistence, "mario", &["CITIZEN"], None);
    let public_relations = seed_user(&mut persistence, "pr_officer", &["PUBLIC_RELATIONS"], None);
    let lighting_officer = seed_user(
        &mut persistence,
        "lighting",
        &["PUBLIC_LIGHTING_OFFICER"],
        None,
    );
    let waste_officer = seed_user(
        &mut persistence,
        "waste",
        &["WASTE_MANAGEMENT_OFFICER"],
        None,
    );
    let company_id = persistence
        .create_company(&NewCompany {
            name: String::from("Luce Srl"),
            categories: vec![ReportCategory::PublicLighting],
            has_platform_access: true,
        })
        .unwrap();
    let technician = seed_user(
        &mut persistence,
        "tech_a",
        &["EXTERNAL_MAINTAINER"],
        Some(company_id),
    );

    let upload_dir = std::env::temp_dir().join(format!(
        "participium_server_tests_{:016x}",
        rand::random::<u64>()
    ));
    let state = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        photo_storage: Arc::new(DiskPhotoStorage::new(upload_dir, "/uploads").unwrap()),
        address_resolver: Arc::new(FallbackAddressResolver),
        service_area: Arc::new(ServiceArea::turin()),
        policy: AssignmentPolicy::default(),
    };

    TestServer {
        app: build_router(state.clone()),
        state,
        citizen,
        public_relations,
        lighting_officer,
        waste_officer,
        technician,
        company_id,
    }
}

/// Encodes the report form with a single JPEG photo.
pub fn report_form(latitude: &str, longitude: &str) -> Vec<u8> {
    let fields: [(&str, &str); 6] = [
        ("title", "Street lamp out"),
        ("description", "The lamp in front of number 12 is dark"),
        ("category", "PUBLIC_LIGHTING"),
        ("latitude", latitude),
        ("longitude", longitude),
        ("is_anonymous", "false"),
    ];
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photos\"; filename=\"lamp.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0]);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, user_id: i64, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, user_id: Option<i64>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, user_id: Option<i64>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

/// Files a report through the HTTP surface and returns its id.
pub async fn submit_report(server: &TestServer) -> i64 {
    let (status, body) = send(
        &server.app,
        multipart_request("/reports", server.citizen, report_form("45.0703", "7.6869")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["report_id"].as_i64().unwrap()
}

pub async fn approve(server: &TestServer, report_id: i64) -> (StatusCode, Value) {
    send(
        &server.app,
        json_request(
            "POST",
            &format!("/reports/{report_id}/approve"),
            Some(server.public_relations),
            &serde_json::json!({ "assigned_technical_id": server.lighting_officer }),
        ),
    )
    .await
}
