// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report queries.
//!
//! A report is read as its `reports` row plus its `report_photos` rows.
//! The external handler is spread across four nullable columns and is
//! rebuilt through `ExternalHandler::from_columns`.

use std::collections::BTreeMap;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use participium_domain::{Coordinates, ExternalHandler, Report, ReportPhoto, ReportStatus};

use crate::data_models::ReportFilter;
use crate::diesel_schema::{report_photos, reports};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = reports)]
pub(crate) struct ReportRow {
    pub report_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub is_anonymous: i32,
    pub status: String,
    pub assigned_to_id: Option<i64>,
    pub external_handler_type: Option<String>,
    pub external_maintainer_id: Option<i64>,
    pub external_company_id: Option<i64>,
    pub external_technician_id: Option<i64>,
    pub rejected_reason: Option<String>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = report_photos)]
pub(crate) struct PhotoRow {
    pub photo_id: i64,
    pub report_id: i64,
    pub url: String,
    pub filename: String,
}

fn report_from_row(row: ReportRow, photos: Vec<ReportPhoto>) -> Result<Report, PersistenceError> {
    let external_handler = ExternalHandler::from_columns(
        row.external_handler_type.as_deref(),
        row.external_maintainer_id,
        row.external_company_id,
        row.external_technician_id,
    )?;

    Ok(Report {
        report_id: row.report_id,
        user_id: row.user_id,
        title: row.title,
        description: row.description,
        category: row.category.parse()?,
        coordinates: Coordinates::new(row.latitude, row.longitude),
        address: row.address,
        is_anonymous: row.is_anonymous != 0,
        status: row.status.parse()?,
        assigned_to_id: row.assigned_to_id,
        external_handler,
        rejected_reason: row.rejected_reason,
        version: row.version,
        created_at: row.created_at,
        updated_at: row.updated_at,
        photos,
    })
}

/// Attaches photos to their reports, preserving the order of `rows`.
pub(crate) fn assemble_reports(
    rows: Vec<ReportRow>,
    photo_rows: Vec<PhotoRow>,
) -> Result<Vec<Report>, PersistenceError> {
    let mut photos_by_report: BTreeMap<i64, Vec<ReportPhoto>> = BTreeMap::new();
    for photo in photo_rows {
        photos_by_report
            .entry(photo.report_id)
            .or_default()
            .push(ReportPhoto {
                photo_id: photo.photo_id,
                report_id: photo.report_id,
                url: photo.url,
                filename: photo.filename,
            });
    }

    rows.into_iter()
        .map(|row| {
            let photos = photos_by_report.remove(&row.report_id).unwrap_or_default();
            report_from_row(row, photos)
        })
        .collect()
}

backend_fn! {
/// Lists reports matching `filter`, newest first.
///
/// Ties on `created_at` are broken by descending id.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored value
/// cannot be mapped back to the domain.
pub fn list_reports(
    conn: &mut _,
    filter: &ReportFilter,
) -> Result<Vec<Report>, PersistenceError> {
    let mut query = reports::table
        .select(ReportRow::as_select())
        .order((reports::created_at.desc(), reports::report_id.desc()))
        .into_boxed();

    if let Some(report_id) = filter.report_id {
        query = query.filter(reports::report_id.eq(report_id));
    }
    if !filter.statuses.is_empty() {
        let statuses: Vec<&str> = filter.statuses.iter().map(ReportStatus::as_str).collect();
        query = query.filter(reports::status.eq_any(statuses));
    }
    if let Some(category) = filter.category {
        query = query.filter(reports::category.eq(category.as_str()));
    }
    if let Some(owner_id) = filter.owner_id {
        query = query.filter(reports::user_id.eq(owner_id));
    }
    if let Some(handler) = filter.handler {
        let company_without_technician = reports::external_company_id
            .eq(handler.company_id)
            .and(reports::external_technician_id.is_null());
        query = query.filter(
            reports::assigned_to_id
                .eq(handler.user_id)
                .or(reports::external_maintainer_id.eq(handler.user_id))
                .or(reports::external_technician_id.eq(handler.user_id))
                .or(company_without_technician),
        );
    }

    let rows: Vec<ReportRow> = query.load(conn)?;
    let ids: Vec<i64> = rows.iter().map(|row| row.report_id).collect();
    let photo_rows: Vec<PhotoRow> = report_photos::table
        .filter(report_photos::report_id.eq_any(&ids))
        .order(report_photos::photo_id.asc())
        .select(PhotoRow::as_select())
        .load(conn)?;

    assemble_reports(rows, photo_rows)
}
}
