// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification inbox queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;
use participium_domain::Notification;

use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = notifications)]
pub(crate) struct NotificationRow {
    pub notification_id: i64,
    pub user_id: i64,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub is_read: i32,
    pub report_id: Option<i64>,
    pub created_at: String,
}

impl NotificationRow {
    pub(crate) fn into_notification(self) -> Result<Notification, PersistenceError> {
        Ok(Notification {
            notification_id: self.notification_id,
            user_id: self.user_id,
            notification_type: self.notification_type.parse()?,
            title: self.title,
            message: self.message,
            is_read: self.is_read != 0,
            report_id: self.report_id,
            created_at: self.created_at,
        })
    }
}

backend_fn! {
/// A user's notifications, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The recipient
/// * `unread_only` - Skip notifications already marked read
/// * `limit` - Maximum number of rows, all rows when `None`
///
/// # Errors
///
/// Returns an error if the database cannot be queried or `limit` does not
/// fit a SQL `LIMIT`.
pub fn list_notifications(
    conn: &mut _,
    user_id: i64,
    unread_only: bool,
    limit: Option<usize>,
) -> Result<Vec<Notification>, PersistenceError> {
    let mut query = notifications::table
        .filter(notifications::user_id.eq(user_id))
        .order((
            notifications::created_at.desc(),
            notifications::notification_id.desc(),
        ))
        .select(NotificationRow::as_select())
        .into_boxed();

    if unread_only {
        query = query.filter(notifications::is_read.eq(0));
    }
    if let Some(limit) = limit {
        let limit: i64 = limit
            .to_i64()
            .ok_or_else(|| PersistenceError::QueryFailed(format!("Limit {limit} out of range")))?;
        query = query.limit(limit);
    }

    query
        .load::<NotificationRow>(conn)?
        .into_iter()
        .map(NotificationRow::into_notification)
        .collect()
}
}

backend_fn! {
/// Loads one notification if it belongs to `user_id`.
///
/// # Errors
///
/// Returns `NotificationNotFound` if the notification does not exist or
/// belongs to another user.
pub fn get_notification(
    conn: &mut _,
    notification_id: i64,
    user_id: i64,
) -> Result<Notification, PersistenceError> {
    notifications::table
        .filter(notifications::notification_id.eq(notification_id))
        .filter(notifications::user_id.eq(user_id))
        .select(NotificationRow::as_select())
        .first::<NotificationRow>(conn)
        .optional()?
        .ok_or(PersistenceError::NotificationNotFound(notification_id))?
        .into_notification()
}
}

backend_fn! {
/// Total notifications for a user.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_notifications(conn: &mut _, user_id: i64) -> Result<i64, PersistenceError> {
    Ok(notifications::table
        .filter(notifications::user_id.eq(user_id))
        .count()
        .get_result(conn)?)
}
}

backend_fn! {
/// Unread notifications for a user.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_unread_notifications(conn: &mut _, user_id: i64) -> Result<i64, PersistenceError> {
    Ok(notifications::table
        .filter(notifications::user_id.eq(user_id))
        .filter(notifications::is_read.eq(0))
        .count()
        .get_result(conn)?)
}
}
