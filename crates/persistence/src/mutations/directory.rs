// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory administration: users, companies and maintainer coverage.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewCompany, NewUser};
use crate::diesel_schema::{company_categories, external_companies, maintainer_categories, user_roles, users};
use crate::error::{PersistenceError, is_foreign_key_violation, is_unique_violation};
use crate::mutations::now_timestamp;

backend_fn! {
/// Creates a user and their role rows.
///
/// # Errors
///
/// Returns `DuplicateUsername` if the username is taken and
/// `CompanyNotFound` if `company_id` names no company.
pub fn create_user(conn: &mut _, new_user: &NewUser) -> Result<i64, PersistenceError> {
    let created_at = now_timestamp()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(users::table)
            .values((
                users::username.eq(&new_user.username),
                users::display_name.eq(&new_user.display_name),
                users::company_id.eq(new_user.company_id),
                users::created_at.eq(&created_at),
            ))
            .execute(conn)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PersistenceError::DuplicateUsername(new_user.username.clone())
                } else if is_foreign_key_violation(&e) {
                    PersistenceError::CompanyNotFound(new_user.company_id.unwrap_or_default())
                } else {
                    e.into()
                }
            })?;
        let user_id = conn.get_last_insert_rowid()?;

        for role in new_user.roles.iter() {
            diesel::insert_into(user_roles::table)
                .values((
                    user_roles::user_id.eq(user_id),
                    user_roles::role.eq(role.as_str()),
                ))
                .execute(conn)?;
        }

        info!(user_id, username = %new_user.username, "Created user");
        Ok(user_id)
    })
}
}

backend_fn! {
/// Registers an external company and the categories it covers.
///
/// # Errors
///
/// Returns `DuplicateCompany` if a company with this name exists.
pub fn create_company(conn: &mut _, company: &NewCompany) -> Result<i64, PersistenceError> {
    let created_at = now_timestamp()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(external_companies::table)
            .values((
                external_companies::name.eq(&company.name),
                external_companies::has_platform_access.eq(i32::from(company.has_platform_access)),
                external_companies::created_at.eq(&created_at),
            ))
            .execute(conn)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PersistenceError::DuplicateCompany(company.name.clone())
                } else {
                    e.into()
                }
            })?;
        let company_id = conn.get_last_insert_rowid()?;

        let mut categories = company.categories.clone();
        categories.sort_unstable();
        categories.dedup();
        for category in categories {
            diesel::insert_into(company_categories::table)
                .values((
                    company_categories::company_id.eq(company_id),
                    company_categories::category.eq(category.as_str()),
                ))
                .execute(conn)?;
        }

        info!(company_id, name = %company.name, "Registered external company");
        Ok(company_id)
    })
}
}

backend_fn! {
/// Records that a maintainer covers `category`.
///
/// Returns `false` when the pair was already registered.
///
/// # Errors
///
/// Returns `UserNotFound` if the user does not exist.
pub fn register_maintainer_category(
    conn: &mut _,
    user_id: i64,
    category: &str,
) -> Result<bool, PersistenceError> {
    let existing: i64 = maintainer_categories::table
        .filter(maintainer_categories::user_id.eq(user_id))
        .filter(maintainer_categories::category.eq(category))
        .count()
        .get_result(conn)?;
    if existing > 0 {
        debug!(user_id, category, "Maintainer category already registered");
        return Ok(false);
    }

    diesel::insert_into(maintainer_categories::table)
        .values((
            maintainer_categories::user_id.eq(user_id),
            maintainer_categories::category.eq(category),
        ))
        .execute(conn)
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                PersistenceError::UserNotFound(user_id)
            } else {
                e.into()
            }
        })?;

    info!(user_id, category, "Registered maintainer category");
    Ok(true)
}
}
