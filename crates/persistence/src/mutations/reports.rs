// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report creation and lifecycle writes.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use participium::TransitionResult;
use participium_domain::{ExternalHandler, NewReport, ReportStatus};
use tracing::{info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::PersistTransitionResult;
use crate::diesel_schema::{report_photos, reports};
use crate::error::{PersistenceError, is_foreign_key_violation};
use crate::mutations::now_timestamp;

backend_fn! {
/// Stores a new report in `PENDING_APPROVAL` together with its photos.
///
/// # Errors
///
/// Returns `UserNotFound` if the reporter does not exist. Nothing is
/// written when any insert fails.
pub fn create_report(conn: &mut _, report: &NewReport) -> Result<i64, PersistenceError> {
    let now = now_timestamp()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(reports::table)
            .values((
                reports::user_id.eq(report.user_id),
                reports::title.eq(report.title.trim()),
                reports::description.eq(report.description.trim()),
                reports::category.eq(report.category.as_str()),
                reports::latitude.eq(report.coordinates.latitude),
                reports::longitude.eq(report.coordinates.longitude),
                reports::address.eq(&report.address),
                reports::is_anonymous.eq(i32::from(report.is_anonymous)),
                reports::status.eq(ReportStatus::PendingApproval.as_str()),
                reports::version.eq(0_i64),
                reports::created_at.eq(&now),
                reports::updated_at.eq(&now),
            ))
            .execute(conn)
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    PersistenceError::UserNotFound(report.user_id)
                } else {
                    e.into()
                }
            })?;
        let report_id = conn.get_last_insert_rowid()?;

        for photo in &report.photos {
            diesel::insert_into(report_photos::table)
                .values((
                    report_photos::report_id.eq(report_id),
                    report_photos::url.eq(&photo.url),
                    report_photos::filename.eq(&photo.filename),
                ))
                .execute(conn)?;
        }

        info!(
            report_id,
            user_id = report.user_id,
            category = %report.category,
            photos = report.photos.len(),
            "Created report"
        );
        Ok(report_id)
    })
}
}

backend_fn! {
/// Writes a lifecycle transition and its notifications atomically.
///
/// The report row is only updated while it still carries the status and
/// version the transition was computed from. Every notification draft is
/// inserted in the same transaction.
///
/// # Errors
///
/// Returns `StaleReport` if another transition committed first; no
/// notification is written in that case.
pub fn persist_transition(
    conn: &mut _,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    let report = &result.report;
    let handler: Option<&ExternalHandler> = report.external_handler.as_ref();
    let now = now_timestamp()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(reports::table)
            .filter(reports::report_id.eq(report.report_id))
            .filter(reports::status.eq(result.expected_status.as_str()))
            .filter(reports::version.eq(result.expected_version))
            .set((
                reports::status.eq(report.status.as_str()),
                reports::assigned_to_id.eq(report.assigned_to_id),
                reports::external_handler_type.eq(handler.map(ExternalHandler::kind)),
                reports::external_maintainer_id.eq(handler.and_then(ExternalHandler::maintainer_id)),
                reports::external_company_id.eq(handler.and_then(ExternalHandler::company_id)),
                reports::external_technician_id.eq(handler.and_then(ExternalHandler::technician_id)),
                reports::rejected_reason.eq(report.rejected_reason.as_deref()),
                reports::version.eq(report.version),
                reports::updated_at.eq(&now),
            ))
            .execute(conn)?;

        if updated == 0 {
            warn!(
                report_id = report.report_id,
                expected_status = %result.expected_status,
                expected_version = result.expected_version,
                "Conditional report update matched no row"
            );
            return Err(PersistenceError::StaleReport {
                report_id: report.report_id,
                expected_version: result.expected_version,
            });
        }

        let mut notification_ids: Vec<i64> = Vec::with_capacity(result.notifications.len());
        for draft in &result.notifications {
            notification_ids.push(insert_notification!(conn, draft, &now));
        }

        info!(
            report_id = report.report_id,
            from = %result.expected_status,
            to = %report.status,
            version = report.version,
            notifications = notification_ids.len(),
            "Persisted report transition"
        );

        Ok(PersistTransitionResult {
            report_id: report.report_id,
            version: report.version,
            notification_ids,
        })
    })
}
}
