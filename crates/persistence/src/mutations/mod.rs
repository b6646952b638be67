// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! - `directory`: users, companies and maintainer categories
//! - `reports`: report creation and lifecycle transitions
//! - `messaging`: messages and internal notes
//! - `notifications`: standalone notifications and read receipts
//!
//! Multi-row writes run inside a single database transaction. Every
//! function exists as a `_sqlite` and a `_mysql` variant.

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::PersistenceError;

/// UTC timestamps with a fixed width so that text order is time order.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z");

/// The current time as stored in `created_at` / `updated_at` columns.
///
/// # Errors
///
/// Returns `SerializationError` if the clock value cannot be formatted.
pub(crate) fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Inserts one `NotificationDraft` and evaluates to its new id.
///
/// Expands inside a `backend_fn!` body so the insert joins the caller's
/// transaction on either backend.
macro_rules! insert_notification {
    ($conn:ident, $draft:expr, $created_at:expr) => {{
        use crate::diesel_schema::notifications;
        let draft: &participium::NotificationDraft = $draft;
        diesel::insert_into(notifications::table)
            .values((
                notifications::user_id.eq(draft.user_id),
                notifications::notification_type.eq(draft.notification_type.as_str()),
                notifications::title.eq(&draft.title),
                notifications::message.eq(&draft.message),
                notifications::is_read.eq(0),
                notifications::report_id.eq(draft.report_id),
                notifications::created_at.eq($created_at),
            ))
            .execute($conn)?;
        $conn.get_last_insert_rowid()?
    }};
}

pub mod directory;
pub mod messaging;
pub mod notifications;
pub mod reports;

pub use directory::{
    create_company_mysql, create_company_sqlite, create_user_mysql, create_user_sqlite,
    register_maintainer_category_mysql, register_maintainer_category_sqlite,
};
pub use messaging::{
    append_internal_note_mysql, append_internal_note_sqlite, append_message_mysql,
    append_message_sqlite,
};
pub use notifications::{
    create_notification_mysql, create_notification_sqlite, mark_notification_read_mysql,
    mark_notification_read_sqlite,
};
pub use reports::{
    create_report_mysql, create_report_sqlite, persist_transition_mysql,
    persist_transition_sqlite,
};
