// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standalone notification writes.
//!
//! Lifecycle and messaging notifications are written by their own
//! transactions; these functions serve direct dispatch and read receipts.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use participium::NotificationDraft;
use participium_domain::Notification;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{notifications, users};
use crate::error::PersistenceError;
use crate::mutations::now_timestamp;
use crate::queries::notifications::NotificationRow;

backend_fn! {
/// Creates one notification for an existing user.
///
/// # Errors
///
/// Returns `UserNotFound` if the recipient does not exist.
pub fn create_notification(
    conn: &mut _,
    draft: &NotificationDraft,
) -> Result<Notification, PersistenceError> {
    let created_at = now_timestamp()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let recipients: i64 = users::table
            .filter(users::user_id.eq(draft.user_id))
            .count()
            .get_result(conn)?;
        if recipients == 0 {
            return Err(PersistenceError::UserNotFound(draft.user_id));
        }

        let notification_id = insert_notification!(conn, draft, &created_at);
        info!(
            notification_id,
            user_id = draft.user_id,
            notification_type = %draft.notification_type,
            "Created notification"
        );

        Ok(Notification {
            notification_id,
            user_id: draft.user_id,
            notification_type: draft.notification_type,
            title: draft.title.clone(),
            message: draft.message.clone(),
            is_read: false,
            report_id: draft.report_id,
            created_at: created_at.clone(),
        })
    })
}
}

backend_fn! {
/// Marks a notification as read. Marking it again changes nothing.
///
/// # Errors
///
/// Returns `NotificationNotFound` if the notification does not exist or
/// belongs to another user.
pub fn mark_notification_read(
    conn: &mut _,
    notification_id: i64,
    user_id: i64,
) -> Result<Notification, PersistenceError> {
    let row: NotificationRow = notifications::table
        .filter(notifications::notification_id.eq(notification_id))
        .filter(notifications::user_id.eq(user_id))
        .select(NotificationRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::NotificationNotFound(notification_id))?;

    if row.is_read == 0 {
        diesel::update(notifications::table)
            .filter(notifications::notification_id.eq(notification_id))
            .set(notifications::is_read.eq(1))
            .execute(conn)?;
        debug!(notification_id, user_id, "Marked notification read");
    }

    let mut notification = row.into_notification()?;
    notification.is_read = true;
    Ok(notification)
}
}
