// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod category;
mod error;
mod geofence;
mod report_status;
mod role;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use category::{ReportCategory, TechnicalRole, technical_roles_for};
pub use error::DomainError;
pub use geofence::{GeoPoint, ServiceArea};
pub use report_status::ReportStatus;
pub use role::{Role, RoleSet};

// Re-export public types
pub use types::{
    Coordinates, ExternalCompany, ExternalHandler, InternalNote, NewReport, NewReportPhoto,
    Notification, NotificationType, Report, ReportMessage, ReportPhoto, UserAccount,
};
pub use validation::{
    MAX_CONTENT_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_PHOTOS, MAX_TITLE_LENGTH, MIN_PHOTOS,
    validate_content, validate_coordinates, validate_description, validate_photo_count,
    validate_rejection_reason, validate_title,
};
