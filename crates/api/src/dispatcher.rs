// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification delivery outside lifecycle transitions.
//!
//! Transition notifications are written by `Persistence::persist_transition`
//! in the same database transaction as the status change. This dispatcher
//! covers standalone notifications and the per-user inbox.

use participium::NotificationDraft;
use participium_domain::{Notification, NotificationType};
use participium_persistence::Persistence;
use tracing::info;

use crate::error::{ApiError, translate_persistence_error};

pub struct NotificationDispatcher<'a> {
    persistence: &'a mut Persistence,
}

impl<'a> NotificationDispatcher<'a> {
    pub const fn new(persistence: &'a mut Persistence) -> Self {
        Self { persistence }
    }

    /// Writes one notification for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn notify(
        &mut self,
        user_id: i64,
        notification_type: NotificationType,
        title: &str,
        message: &str,
        report_id: Option<i64>,
    ) -> Result<Notification, ApiError> {
        let draft = NotificationDraft::new(user_id, notification_type, title, message, report_id);
        let notification: Notification = self
            .persistence
            .create_notification(&draft)
            .map_err(translate_persistence_error)?;
        info!(
            notification_id = notification.notification_id,
            user_id,
            notification_type = %notification_type,
            "Notification dispatched"
        );
        Ok(notification)
    }

    /// The user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_for_user(
        &mut self,
        user_id: i64,
        unread_only: bool,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>, ApiError> {
        self.persistence
            .list_notifications(user_id, unread_only, limit)
            .map_err(translate_persistence_error)
    }

    /// Marks a notification read. Marking it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist or belongs to
    /// another user.
    pub fn mark_read(
        &mut self,
        notification_id: i64,
        user_id: i64,
    ) -> Result<Notification, ApiError> {
        self.persistence
            .mark_notification_read(notification_id, user_id)
            .map_err(translate_persistence_error)
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn unread_count(&mut self, user_id: i64) -> Result<i64, ApiError> {
        self.persistence
            .count_unread_notifications(user_id)
            .map_err(translate_persistence_error)
    }
}
