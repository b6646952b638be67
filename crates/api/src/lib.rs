// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Participium reporting system.
//!
//! Sits between a transport (the HTTP server) and the lifecycle engine.
//! Requests arrive as DTOs from [`request_response`], are authorized
//! against an [`AuthenticatedActor`], and are carried out through the
//! persistence adapter. All errors leave as [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod collaborators;
mod dispatcher;
mod error;
mod handlers;
mod request_response;
mod resolver;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, authenticate_user};
pub use collaborators::{
    AddressResolver, FallbackAddressResolver, PhotoStorage, PhotoUpload, StoredPhoto,
    fallback_address,
};
pub use dispatcher::NotificationDispatcher;
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    add_internal_note, approve_report, assign_external, create_company, create_report,
    create_user, get_report, list_assignable_externals, list_assignable_technicals,
    list_assigned_reports, list_internal_notes, list_messages, list_my_reports,
    list_notifications, list_pending_reports, list_public_reports, mark_notification_read,
    register_maintainer_category, reject_report, send_message, unread_notification_count,
    update_status,
};
pub use request_response::{
    ApproveReportRequest, AssignExternalRequest, AssignableExternalsResponse,
    AssignableTechnicalsResponse, CreateCompanyRequest, CreateCompanyResponse,
    CreateReportRequest, CreateReportResponse, CreateUserRequest, CreateUserResponse,
    ListInternalNotesResponse, ListMessagesResponse, ListNotificationsRequest,
    ListNotificationsResponse, ListReportsResponse, PhotoInfo, PostContentRequest,
    RegisterMaintainerCategoryRequest, RegisterMaintainerCategoryResponse, RejectReportRequest,
    ReportInfo, ReporterInfo, SendMessageResponse, TransitionResponse, UnreadCountResponse,
    UpdateStatusRequest,
};
pub use resolver::{
    assignable_externals, assignable_technicals, current_external_users, transition_context,
};
