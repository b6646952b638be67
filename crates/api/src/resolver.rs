// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loads the directory data the lifecycle engine decides against.
//!
//! The engine is pure: eligible sets and the users behind the current
//! external handler are read here and handed to it in a
//! [`TransitionContext`].

use participium::{
    AssignmentPolicy, Command, EligibleExternal, EligibleTechnical, TransitionContext,
    eligible_externals, eligible_technicals, external_users,
};
use participium_domain::{ExternalCompany, Report, UserAccount};
use participium_persistence::{Persistence, PersistenceError};

/// Technical officers the report may be assigned to.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn assignable_technicals(
    persistence: &mut Persistence,
    report: &Report,
    policy: AssignmentPolicy,
) -> Result<Vec<EligibleTechnical>, PersistenceError> {
    let staff: Vec<UserAccount> = persistence.list_technical_staff(report.category)?;
    let previous_handlers: Vec<UserAccount> = if policy.include_previous_handlers {
        persistence.list_previous_handlers(report.category)?
    } else {
        Vec::new()
    };
    Ok(eligible_technicals(
        report,
        &staff,
        &previous_handlers,
        policy,
    ))
}

/// External companies and maintainers the report may be delegated to.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn assignable_externals(
    persistence: &mut Persistence,
    report: &Report,
) -> Result<Vec<EligibleExternal>, PersistenceError> {
    let companies: Vec<ExternalCompany> = persistence.list_companies_for_category(report.category)?;
    let company_ids: Vec<i64> = companies.iter().map(|c| c.company_id).collect();
    let technicians: Vec<UserAccount> = persistence.list_company_technicians(&company_ids)?;
    let maintainers = persistence.list_maintainers_for_category(report.category)?;
    Ok(eligible_externals(
        report,
        &companies,
        &technicians,
        &maintainers,
    ))
}

/// Users behind the report's external handler; empty when not delegated.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn current_external_users(
    persistence: &mut Persistence,
    report: &Report,
) -> Result<Vec<i64>, PersistenceError> {
    let Some(handler) = report.external_handler else {
        return Ok(Vec::new());
    };
    let technicians: Vec<UserAccount> = match handler.company_id() {
        Some(company_id) => persistence.list_company_technicians(&[company_id])?,
        None => Vec::new(),
    };
    Ok(external_users(&handler, &technicians))
}

/// Builds the context `command` needs. Eligible sets are only loaded for
/// the commands that check them.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn transition_context(
    persistence: &mut Persistence,
    report: &Report,
    command: &Command,
    policy: AssignmentPolicy,
) -> Result<TransitionContext, PersistenceError> {
    let eligible_technicals: Vec<i64> = match command {
        Command::Approve { .. } => assignable_technicals(persistence, report, policy)?
            .into_iter()
            .map(|t| t.user_id)
            .collect(),
        _ => Vec::new(),
    };
    let eligible_externals: Vec<EligibleExternal> = match command {
        Command::AssignToExternal { .. } => assignable_externals(persistence, report)?,
        _ => Vec::new(),
    };

    Ok(TransitionContext {
        eligible_technicals,
        eligible_externals,
        current_external_users: current_external_users(persistence, report)?,
        policy,
    })
}
