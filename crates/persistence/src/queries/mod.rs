// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `directory`: users, roles, companies and maintainer categories
//! - `reports`: report listings with photos
//! - `messaging`: message threads and internal notes
//! - `notifications`: per-user inboxes and counts
//!
//! Every function exists as a `_sqlite` and a `_mysql` variant; the
//! `Persistence` adapter in `lib.rs` picks one per call.

pub mod directory;
pub mod messaging;
pub mod notifications;
pub mod reports;

pub use directory::{
    get_company_mysql, get_company_sqlite, get_user_mysql, get_user_sqlite,
    list_companies_for_category_mysql, list_companies_for_category_sqlite,
    list_company_technicians_mysql, list_company_technicians_sqlite,
    list_maintainers_for_category_mysql, list_maintainers_for_category_sqlite,
    list_previous_handlers_mysql, list_previous_handlers_sqlite, list_users_by_ids_mysql,
    list_users_by_ids_sqlite, list_users_with_roles_mysql, list_users_with_roles_sqlite,
};
pub use messaging::{
    list_internal_notes_mysql, list_internal_notes_sqlite, list_messages_mysql,
    list_messages_sqlite,
};
pub use notifications::{
    count_notifications_mysql, count_notifications_sqlite, count_unread_notifications_mysql,
    count_unread_notifications_sqlite, get_notification_mysql, get_notification_sqlite,
    list_notifications_mysql, list_notifications_sqlite,
};
pub use reports::{list_reports_mysql, list_reports_sqlite};
