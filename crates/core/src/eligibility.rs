// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment resolution.
//!
//! Computes who may receive a report. The functions are pure: the caller
//! loads the directory rows, the resolver filters them. An empty result is
//! a normal answer; assignment against it is rejected by `apply`.

use crate::state::AssignmentPolicy;
use participium_domain::{
    ExternalCompany, ExternalHandler, Report, ReportCategory, Role, UserAccount,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A technical officer who may be assigned a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleTechnical {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
}

/// A platform user employed by an external company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleTechnician {
    pub user_id: i64,
    pub display_name: String,
}

/// An external party a report may be delegated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EligibleExternal {
    /// An independent external maintainer.
    User { user_id: i64, display_name: String },
    /// A company with platform access and its technician roster.
    Company {
        company_id: i64,
        name: String,
        technicians: Vec<EligibleTechnician>,
    },
}

impl EligibleExternal {
    /// Returns true if `handler` targets this party. A named technician
    /// must be on the company's roster.
    #[must_use]
    pub fn admits(&self, handler: &ExternalHandler) -> bool {
        match (self, handler) {
            (
                Self::User { user_id, .. },
                ExternalHandler::User {
                    external_maintainer_id,
                },
            ) => user_id == external_maintainer_id,
            (
                Self::Company {
                    company_id,
                    technicians,
                    ..
                },
                ExternalHandler::Company {
                    external_company_id,
                    technician_id,
                },
            ) => {
                company_id == external_company_id
                    && technician_id
                        .is_none_or(|id| technicians.iter().any(|t| t.user_id == id))
            }
            _ => false,
        }
    }

    /// The users to notify when `handler` is delegated to this party.
    ///
    /// A company without a named technician notifies its whole roster.
    #[must_use]
    pub fn recipients_for(&self, handler: &ExternalHandler) -> Vec<i64> {
        match (self, handler) {
            (Self::User { user_id, .. }, _) => vec![*user_id],
            (
                Self::Company { .. },
                ExternalHandler::Company {
                    technician_id: Some(id),
                    ..
                },
            ) => vec![*id],
            (Self::Company { technicians, .. }, _) => {
                technicians.iter().map(|t| t.user_id).collect()
            }
        }
    }
}

/// An independent external maintainer and the categories they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintainerProfile {
    pub account: UserAccount,
    pub categories: Vec<ReportCategory>,
}

/// Technical officers eligible for `report`, ordered by user id.
///
/// `staff` is every user holding a technical role. `previous_handlers`
/// are officers who handled reports of the same category before and are
/// only considered when the policy asks for them.
#[must_use]
pub fn eligible_technicals(
    report: &Report,
    staff: &[UserAccount],
    previous_handlers: &[UserAccount],
    policy: AssignmentPolicy,
) -> Vec<EligibleTechnical> {
    let mut eligible: BTreeMap<i64, EligibleTechnical> = BTreeMap::new();

    let by_role = staff
        .iter()
        .filter(|user| user.roles.covers_category(report.category));
    let by_history = previous_handlers
        .iter()
        .filter(|_| policy.include_previous_handlers)
        .filter(|user| user.roles.technical_roles().next().is_some());

    for user in by_role.chain(by_history) {
        eligible
            .entry(user.user_id)
            .or_insert_with(|| EligibleTechnical {
                user_id: user.user_id,
                username: user.username.clone(),
                display_name: user.display_name.clone(),
            });
    }

    eligible.into_values().collect()
}

/// External parties eligible for `report`.
///
/// Companies must cover the category and have platform access; their
/// roster is every `technicians` entry linked to them, possibly empty.
/// Maintainers must hold `EXTERNAL_MAINTAINER`, belong to no company and
/// cover the category. Companies come first, each group ordered by id.
#[must_use]
pub fn eligible_externals(
    report: &Report,
    companies: &[ExternalCompany],
    technicians: &[UserAccount],
    maintainers: &[MaintainerProfile],
) -> Vec<EligibleExternal> {
    let mut companies: Vec<&ExternalCompany> = companies
        .iter()
        .filter(|c| c.has_platform_access && c.categories.contains(&report.category))
        .collect();
    companies.sort_by_key(|c| c.company_id);

    let mut maintainers: Vec<&MaintainerProfile> = maintainers
        .iter()
        .filter(|m| {
            m.account.company_id.is_none()
                && m.account.roles.has_role(Role::ExternalMaintainer)
                && m.categories.contains(&report.category)
        })
        .collect();
    maintainers.sort_by_key(|m| m.account.user_id);

    let company_entries = companies.into_iter().map(|company| {
        let mut roster: Vec<EligibleTechnician> = technicians
            .iter()
            .filter(|t| t.company_id == Some(company.company_id))
            .map(|t| EligibleTechnician {
                user_id: t.user_id,
                display_name: t.display_name.clone(),
            })
            .collect();
        roster.sort_by_key(|t| t.user_id);
        EligibleExternal::Company {
            company_id: company.company_id,
            name: company.name.clone(),
            technicians: roster,
        }
    });
    let maintainer_entries = maintainers.into_iter().map(|m| EligibleExternal::User {
        user_id: m.account.user_id,
        display_name: m.account.display_name.clone(),
    });

    company_entries.chain(maintainer_entries).collect()
}

/// The platform users behind an external handler.
///
/// `technicians` are the users linked to the handler's company.
#[must_use]
pub fn external_users(handler: &ExternalHandler, technicians: &[UserAccount]) -> Vec<i64> {
    match handler {
        ExternalHandler::User {
            external_maintainer_id,
        } => vec![*external_maintainer_id],
        ExternalHandler::Company {
            technician_id: Some(id),
            ..
        } => vec![*id],
        ExternalHandler::Company {
            external_company_id,
            technician_id: None,
        } => technicians
            .iter()
            .filter(|t| t.company_id == Some(*external_company_id))
            .map(|t| t.user_id)
            .collect(),
    }
}
