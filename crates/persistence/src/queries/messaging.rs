// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Message thread and internal note queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use participium_domain::{InternalNote, ReportMessage};

use crate::diesel_schema::{internal_notes, report_messages};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = report_messages)]
struct MessageRow {
    message_id: i64,
    report_id: i64,
    sender_id: i64,
    content: String,
    created_at: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = internal_notes)]
struct NoteRow {
    note_id: i64,
    report_id: i64,
    author_id: i64,
    author_name: String,
    author_role: String,
    content: String,
    created_at: String,
}

backend_fn! {
/// The message thread of a report, oldest first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_messages(
    conn: &mut _,
    report_id: i64,
) -> Result<Vec<ReportMessage>, PersistenceError> {
    let rows: Vec<MessageRow> = report_messages::table
        .filter(report_messages::report_id.eq(report_id))
        .order((
            report_messages::created_at.asc(),
            report_messages::message_id.asc(),
        ))
        .select(MessageRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| ReportMessage {
            message_id: row.message_id,
            report_id: row.report_id,
            sender_id: row.sender_id,
            content: row.content,
            created_at: row.created_at,
        })
        .collect())
}
}

backend_fn! {
/// Staff-only notes on a report, oldest first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_internal_notes(
    conn: &mut _,
    report_id: i64,
) -> Result<Vec<InternalNote>, PersistenceError> {
    let rows: Vec<NoteRow> = internal_notes::table
        .filter(internal_notes::report_id.eq(report_id))
        .order((internal_notes::created_at.asc(), internal_notes::note_id.asc()))
        .select(NoteRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| InternalNote {
            note_id: row.note_id,
            report_id: row.report_id,
            author_id: row.author_id,
            author_name: row.author_name,
            author_role: row.author_role,
            content: row.content,
            created_at: row.created_at,
        })
        .collect())
}
}
