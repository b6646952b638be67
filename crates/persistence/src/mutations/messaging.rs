// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Message and internal note writes.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use participium::NotificationDraft;
use participium_domain::{InternalNote, ReportMessage};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{internal_notes, report_messages};
use crate::error::{PersistenceError, is_foreign_key_violation};
use crate::mutations::now_timestamp;

backend_fn! {
/// Appends a message to a report thread and notifies its recipients.
///
/// The message and every notification commit together.
///
/// # Errors
///
/// Returns `ReportNotFound` if the report does not exist.
pub fn append_message(
    conn: &mut _,
    report_id: i64,
    sender_id: i64,
    content: &str,
    recipients: &[NotificationDraft],
) -> Result<ReportMessage, PersistenceError> {
    let created_at = now_timestamp()?;
    let content = content.trim();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(report_messages::table)
            .values((
                report_messages::report_id.eq(report_id),
                report_messages::sender_id.eq(sender_id),
                report_messages::content.eq(content),
                report_messages::created_at.eq(&created_at),
            ))
            .execute(conn)
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    PersistenceError::ReportNotFound(report_id)
                } else {
                    e.into()
                }
            })?;
        let message_id = conn.get_last_insert_rowid()?;

        for draft in recipients {
            insert_notification!(conn, draft, &created_at);
        }

        info!(
            report_id,
            message_id,
            sender_id,
            notified = recipients.len(),
            "Appended report message"
        );

        Ok(ReportMessage {
            message_id,
            report_id,
            sender_id,
            content: content.to_string(),
            created_at: created_at.clone(),
        })
    })
}
}

backend_fn! {
/// Adds a staff-only note to a report.
///
/// The author's name and role are copied onto the note.
///
/// # Errors
///
/// Returns `ReportNotFound` if the report does not exist.
pub fn append_internal_note(
    conn: &mut _,
    report_id: i64,
    author_id: i64,
    author_name: &str,
    author_role: &str,
    content: &str,
) -> Result<InternalNote, PersistenceError> {
    let created_at = now_timestamp()?;
    let content = content.trim();

    diesel::insert_into(internal_notes::table)
        .values((
            internal_notes::report_id.eq(report_id),
            internal_notes::author_id.eq(author_id),
            internal_notes::author_name.eq(author_name),
            internal_notes::author_role.eq(author_role),
            internal_notes::content.eq(content),
            internal_notes::created_at.eq(&created_at),
        ))
        .execute(conn)
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                PersistenceError::ReportNotFound(report_id)
            } else {
                e.into()
            }
        })?;
    let note_id = conn.get_last_insert_rowid()?;

    info!(report_id, note_id, author_id, "Added internal note");

    Ok(InternalNote {
        note_id,
        report_id,
        author_id,
        author_name: author_name.to_string(),
        author_role: author_role.to_string(),
        content: content.to_string(),
        created_at,
    })
}
}
