// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User roles and role sets.
//!
//! A user always carries a set of roles drawn from a closed vocabulary.
//! Every authorization check in the system is expressed as a predicate over
//! a [`RoleSet`].

use crate::category::{ReportCategory, TechnicalRole};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A single role from the closed role vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    /// A resident filing reports.
    Citizen,
    /// Municipal staff reviewing incoming reports.
    PublicRelations,
    /// A category-specific technical officer.
    Technical(TechnicalRole),
    /// Staff of an external maintenance company, or an independent maintainer.
    ExternalMaintainer,
    /// Platform administrator.
    Administrator,
}

impl Role {
    /// Returns the persisted / wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "CITIZEN",
            Self::PublicRelations => "PUBLIC_RELATIONS",
            Self::Technical(role) => role.as_str(),
            Self::ExternalMaintainer => "EXTERNAL_MAINTAINER",
            Self::Administrator => "ADMINISTRATOR",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CITIZEN" => Ok(Self::Citizen),
            "PUBLIC_RELATIONS" => Ok(Self::PublicRelations),
            "EXTERNAL_MAINTAINER" => Ok(Self::ExternalMaintainer),
            "ADMINISTRATOR" => Ok(Self::Administrator),
            other => other.parse::<TechnicalRole>().map(Self::Technical),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// The set of roles held by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Creates an empty role set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Parses a role set from role names.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` for the first unknown role name.
    pub fn parse<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().parse::<Role>())
            .collect::<Result<BTreeSet<Role>, DomainError>>()
            .map(Self)
    }

    /// Adds a role to the set.
    pub fn insert(&mut self, role: Role) {
        self.0.insert(role);
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.0.contains(role))
    }

    /// Returns true for any municipal or external staff member.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.0.iter().any(|role| *role != Role::Citizen)
    }

    /// Returns true for roles held inside the municipality: public
    /// relations, technical officers and administrators.
    #[must_use]
    pub fn is_municipal_staff(&self) -> bool {
        self.0.iter().any(|role| {
            matches!(
                role,
                Role::PublicRelations | Role::Technical(_) | Role::Administrator
            )
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The technical roles in this set.
    pub fn technical_roles(&self) -> impl Iterator<Item = TechnicalRole> + '_ {
        self.0.iter().filter_map(|role| match role {
            Role::Technical(technical) => Some(*technical),
            _ => None,
        })
    }

    /// Returns true if any technical role in this set covers `category`.
    #[must_use]
    pub fn covers_category(&self, category: ReportCategory) -> bool {
        self.technical_roles().any(|role| role.covers(category))
    }

    /// The role shown next to a staff member's name.
    ///
    /// Staff roles take precedence over `CITIZEN`; `None` for an empty set.
    #[must_use]
    pub fn primary_display_role(&self) -> Option<Role> {
        self.0
            .iter()
            .find(|role| **role != Role::Citizen)
            .or_else(|| self.0.iter().next())
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }

    /// Role names in their persisted form.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|role| role.as_str().to_string()).collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
