// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User, role and company lookups.
//!
//! Accounts are assembled from two reads: the `users` rows and their
//! `user_roles` rows. Every listing is ordered by primary key.

use std::collections::BTreeMap;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use participium::MaintainerProfile;
use participium_domain::{ExternalCompany, ReportCategory, RoleSet, UserAccount};

use crate::diesel_schema::{
    company_categories, external_companies, maintainer_categories, reports, user_roles, users,
};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    pub company_id: Option<i64>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = external_companies)]
pub(crate) struct CompanyRow {
    pub company_id: i64,
    pub name: String,
    pub has_platform_access: i32,
}

/// Joins user rows with their `(user_id, role)` rows.
///
/// # Errors
///
/// Returns `InvalidStoredValue` if a stored role name is unknown.
pub(crate) fn assemble_accounts(
    user_rows: Vec<UserRow>,
    role_rows: Vec<(i64, String)>,
) -> Result<Vec<UserAccount>, PersistenceError> {
    let mut roles_by_user: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for (user_id, role) in role_rows {
        roles_by_user.entry(user_id).or_default().push(role);
    }

    user_rows
        .into_iter()
        .map(|row| {
            let names = roles_by_user.remove(&row.user_id).unwrap_or_default();
            Ok(UserAccount {
                user_id: row.user_id,
                username: row.username,
                display_name: row.display_name,
                roles: RoleSet::parse(names)?,
                company_id: row.company_id,
            })
        })
        .collect()
}

fn assemble_companies(
    company_rows: Vec<CompanyRow>,
    category_rows: Vec<(i64, String)>,
) -> Result<Vec<ExternalCompany>, PersistenceError> {
    let mut categories_by_company: BTreeMap<i64, Vec<ReportCategory>> = BTreeMap::new();
    for (company_id, category) in category_rows {
        categories_by_company
            .entry(company_id)
            .or_default()
            .push(category.parse()?);
    }

    Ok(company_rows
        .into_iter()
        .map(|row| ExternalCompany {
            company_id: row.company_id,
            categories: categories_by_company
                .remove(&row.company_id)
                .unwrap_or_default(),
            name: row.name,
            has_platform_access: row.has_platform_access != 0,
        })
        .collect())
}

fn account_ids(user_rows: &[UserRow]) -> Vec<i64> {
    user_rows.iter().map(|row| row.user_id).collect()
}

backend_fn! {
/// Loads one account with its roles.
///
/// # Errors
///
/// Returns `UserNotFound` if no user has this id.
pub fn get_user(conn: &mut _, user_id: i64) -> Result<UserAccount, PersistenceError> {
    let user_rows: Vec<UserRow> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .load(conn)?;
    let role_rows: Vec<(i64, String)> = user_roles::table
        .filter(user_roles::user_id.eq(user_id))
        .select((user_roles::user_id, user_roles::role))
        .load(conn)?;

    assemble_accounts(user_rows, role_rows)?
        .pop()
        .ok_or(PersistenceError::UserNotFound(user_id))
}
}

backend_fn! {
/// Loads the accounts with the given ids. Unknown ids are skipped.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_users_by_ids(
    conn: &mut _,
    user_ids: &[i64],
) -> Result<Vec<UserAccount>, PersistenceError> {
    let user_rows: Vec<UserRow> = users::table
        .filter(users::user_id.eq_any(user_ids))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    let role_rows: Vec<(i64, String)> = user_roles::table
        .filter(user_roles::user_id.eq_any(user_ids))
        .select((user_roles::user_id, user_roles::role))
        .load(conn)?;

    assemble_accounts(user_rows, role_rows)
}
}

backend_fn! {
/// Users holding at least one of `role_names`.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_users_with_roles(
    conn: &mut _,
    role_names: &[String],
) -> Result<Vec<UserAccount>, PersistenceError> {
    let holders = user_roles::table
        .filter(user_roles::role.eq_any(role_names))
        .select(user_roles::user_id);
    let user_rows: Vec<UserRow> = users::table
        .filter(users::user_id.eq_any(holders))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    let role_rows: Vec<(i64, String)> = user_roles::table
        .filter(user_roles::user_id.eq_any(account_ids(&user_rows)))
        .select((user_roles::user_id, user_roles::role))
        .load(conn)?;

    assemble_accounts(user_rows, role_rows)
}
}

backend_fn! {
/// Users linked to any of `company_ids`.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_company_technicians(
    conn: &mut _,
    company_ids: &[i64],
) -> Result<Vec<UserAccount>, PersistenceError> {
    let user_rows: Vec<UserRow> = users::table
        .filter(users::company_id.eq_any(company_ids))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    let role_rows: Vec<(i64, String)> = user_roles::table
        .filter(user_roles::user_id.eq_any(account_ids(&user_rows)))
        .select((user_roles::user_id, user_roles::role))
        .load(conn)?;

    assemble_accounts(user_rows, role_rows)
}
}

backend_fn! {
/// Users who were ever the internal assignee of a report in `category`.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_previous_handlers(
    conn: &mut _,
    category: &str,
) -> Result<Vec<UserAccount>, PersistenceError> {
    let assignees = reports::table
        .filter(reports::category.eq(category))
        .filter(reports::assigned_to_id.is_not_null())
        .select(reports::assigned_to_id);
    let user_rows: Vec<UserRow> = users::table
        .filter(users::user_id.nullable().eq_any(assignees))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    let role_rows: Vec<(i64, String)> = user_roles::table
        .filter(user_roles::user_id.eq_any(account_ids(&user_rows)))
        .select((user_roles::user_id, user_roles::role))
        .load(conn)?;

    assemble_accounts(user_rows, role_rows)
}
}

backend_fn! {
/// Maintainers registered for `category`, each with all of their categories.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or holds an unknown
/// role or category.
pub fn list_maintainers_for_category(
    conn: &mut _,
    category: &str,
) -> Result<Vec<MaintainerProfile>, PersistenceError> {
    let registered = maintainer_categories::table
        .filter(maintainer_categories::category.eq(category))
        .select(maintainer_categories::user_id);
    let user_rows: Vec<UserRow> = users::table
        .filter(users::user_id.eq_any(registered))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    let ids = account_ids(&user_rows);
    let role_rows: Vec<(i64, String)> = user_roles::table
        .filter(user_roles::user_id.eq_any(&ids))
        .select((user_roles::user_id, user_roles::role))
        .load(conn)?;
    let category_rows: Vec<(i64, String)> = maintainer_categories::table
        .filter(maintainer_categories::user_id.eq_any(&ids))
        .order(maintainer_categories::maintainer_category_id.asc())
        .select((maintainer_categories::user_id, maintainer_categories::category))
        .load(conn)?;

    let mut categories_by_user: BTreeMap<i64, Vec<ReportCategory>> = BTreeMap::new();
    for (user_id, name) in category_rows {
        categories_by_user
            .entry(user_id)
            .or_default()
            .push(name.parse()?);
    }

    Ok(assemble_accounts(user_rows, role_rows)?
        .into_iter()
        .map(|account| MaintainerProfile {
            categories: categories_by_user
                .remove(&account.user_id)
                .unwrap_or_default(),
            account,
        })
        .collect())
}
}

backend_fn! {
/// Loads one company with its categories.
///
/// # Errors
///
/// Returns `CompanyNotFound` if no company has this id.
pub fn get_company(conn: &mut _, company_id: i64) -> Result<ExternalCompany, PersistenceError> {
    let company_rows: Vec<CompanyRow> = external_companies::table
        .filter(external_companies::company_id.eq(company_id))
        .select(CompanyRow::as_select())
        .load(conn)?;
    let category_rows: Vec<(i64, String)> = company_categories::table
        .filter(company_categories::company_id.eq(company_id))
        .order(company_categories::company_category_id.asc())
        .select((company_categories::company_id, company_categories::category))
        .load(conn)?;

    assemble_companies(company_rows, category_rows)?
        .pop()
        .ok_or(PersistenceError::CompanyNotFound(company_id))
}
}

backend_fn! {
/// Companies registered for `category`, with or without platform access.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_companies_for_category(
    conn: &mut _,
    category: &str,
) -> Result<Vec<ExternalCompany>, PersistenceError> {
    let registered = company_categories::table
        .filter(company_categories::category.eq(category))
        .select(company_categories::company_id);
    let company_rows: Vec<CompanyRow> = external_companies::table
        .filter(external_companies::company_id.eq_any(registered))
        .order(external_companies::company_id.asc())
        .select(CompanyRow::as_select())
        .load(conn)?;
    let ids: Vec<i64> = company_rows.iter().map(|row| row.company_id).collect();
    let category_rows: Vec<(i64, String)> = company_categories::table
        .filter(company_categories::company_id.eq_any(&ids))
        .order(company_categories::company_category_id.asc())
        .select((company_categories::company_id, company_categories::category))
        .load(conn)?;

    assemble_companies(company_rows, category_rows)
}
}
