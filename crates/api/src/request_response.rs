// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use participium::{EligibleExternal, EligibleTechnical};
use participium_domain::{
    ExternalHandler, InternalNote, Notification, Report, ReportMessage, ReportStatus, UserAccount,
};
use serde::{Deserialize, Serialize};

use crate::collaborators::PhotoUpload;

/// A citizen's report submission. Category is still a raw string here.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReportRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_anonymous: bool,
    pub photos: Vec<PhotoUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReportResponse {
    pub report_id: i64,
    pub status: ReportStatus,
    pub address: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveReportRequest {
    pub assigned_technical_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectReportRequest {
    pub reason: String,
}

/// Delegation target, e.g. `{"handler": {"type": "company", "external_company_id": 3}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignExternalRequest {
    pub handler: ExternalHandler,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Outcome of a lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub report_id: i64,
    pub status: ReportStatus,
    pub version: i64,
    pub assigned_to_id: Option<i64>,
    pub external_handler: Option<ExternalHandler>,
    /// Notifications written with the transition.
    pub notifications_created: usize,
}

/// The person who filed a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterInfo {
    pub user_id: i64,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoInfo {
    pub url: String,
    pub filename: String,
}

/// A report as shown to a caller.
///
/// `reporter` is `None` on public listings of anonymous reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInfo {
    pub report_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub is_anonymous: bool,
    pub status: ReportStatus,
    pub reporter: Option<ReporterInfo>,
    pub assigned_to_id: Option<i64>,
    pub external_handler: Option<ExternalHandler>,
    pub rejected_reason: Option<String>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
    pub photos: Vec<PhotoInfo>,
}

impl ReportInfo {
    pub(crate) fn from_report(report: Report, reporter: Option<&UserAccount>) -> Self {
        Self {
            report_id: report.report_id,
            title: report.title,
            description: report.description,
            category: report.category.as_str().to_string(),
            latitude: report.coordinates.latitude,
            longitude: report.coordinates.longitude,
            address: report.address,
            is_anonymous: report.is_anonymous,
            status: report.status,
            reporter: reporter.map(|account| ReporterInfo {
                user_id: account.user_id,
                display_name: account.display_name.clone(),
            }),
            assigned_to_id: report.assigned_to_id,
            external_handler: report.external_handler,
            rejected_reason: report.rejected_reason,
            version: report.version,
            created_at: report.created_at,
            updated_at: report.updated_at,
            photos: report
                .photos
                .into_iter()
                .map(|photo| PhotoInfo {
                    url: photo.url,
                    filename: photo.filename,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListReportsResponse {
    pub reports: Vec<ReportInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignableTechnicalsResponse {
    pub report_id: i64,
    pub technicals: Vec<EligibleTechnical>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignableExternalsResponse {
    pub report_id: i64,
    pub externals: Vec<EligibleExternal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContentRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: ReportMessage,
    /// Users notified of the message.
    pub notified_user_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub report_id: i64,
    pub messages: Vec<ReportMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInternalNotesResponse {
    pub report_id: i64,
    pub notes: Vec<InternalNote>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNotificationsRequest {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNotificationsResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    pub roles: Vec<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user_id: i64,
    pub username: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub categories: Vec<String>,
    pub has_platform_access: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCompanyResponse {
    pub company_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMaintainerCategoryRequest {
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMaintainerCategoryResponse {
    pub user_id: i64,
    pub category: String,
    /// `false` when the maintainer already covered the category.
    pub created: bool,
}
