// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and role checks.
//!
//! Credentials are verified by the surrounding session layer. This module
//! only turns a trusted user id into an [`AuthenticatedActor`] and answers
//! role questions about it.

use participium::Actor;
use participium_domain::{Report, Role, RoleSet, UserAccount};
use participium_persistence::{Persistence, PersistenceError};
use tracing::debug;

use crate::error::{ApiError, translate_persistence_error};

/// The caller of an API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    pub roles: RoleSet,
    /// Set for technicians of an external company.
    pub company_id: Option<i64>,
}

impl AuthenticatedActor {
    /// The identity handed to the lifecycle engine.
    #[must_use]
    pub fn to_core_actor(&self) -> Actor {
        Actor::new(self.user_id, self.roles.clone())
    }

    #[must_use]
    pub fn to_account(&self) -> UserAccount {
        UserAccount {
            user_id: self.user_id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            roles: self.roles.clone(),
            company_id: self.company_id,
        }
    }

    /// The role recorded next to staff annotations.
    #[must_use]
    pub fn display_role(&self) -> String {
        self.roles
            .primary_display_role()
            .map_or_else(String::new, |role| role.as_str().to_string())
    }
}

impl From<UserAccount> for AuthenticatedActor {
    fn from(account: UserAccount) -> Self {
        Self {
            user_id: account.user_id,
            username: account.username,
            display_name: account.display_name,
            roles: account.roles,
            company_id: account.company_id,
        }
    }
}

/// Resolves a trusted caller id to an actor.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if no account has this id, or `Internal`
/// if the directory cannot be read.
pub fn authenticate_user(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<AuthenticatedActor, ApiError> {
    match persistence.get_user(user_id) {
        Ok(account) => {
            debug!(user_id, "Authenticated caller");
            Ok(AuthenticatedActor::from(account))
        }
        Err(PersistenceError::UserNotFound(_)) => Err(ApiError::AuthenticationFailed {
            reason: format!("Unknown user {user_id}"),
        }),
        Err(e) => Err(translate_persistence_error(e)),
    }
}

/// Role-based checks for operations outside the lifecycle engine.
///
/// Lifecycle transitions are authorized by the engine itself.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Requires at least one of `roles`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` naming the accepted roles.
    pub fn require_any_role(
        actor: &AuthenticatedActor,
        action: &str,
        roles: &[Role],
    ) -> Result<(), ApiError> {
        if actor.roles.has_any_role(roles) {
            return Ok(());
        }
        let required_role: String = roles
            .iter()
            .map(Role::as_str)
            .collect::<Vec<&str>>()
            .join(" or ");
        Err(ApiError::Unauthorized {
            action: action.to_string(),
            required_role,
        })
    }

    /// Only citizens may file reports.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for any other caller.
    pub fn authorize_create_report(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        Self::require_any_role(actor, "create_report", &[Role::Citizen])
    }

    /// # Errors
    ///
    /// Returns `Unauthorized` unless the caller is public relations staff.
    pub fn authorize_review(actor: &AuthenticatedActor, action: &str) -> Result<(), ApiError> {
        Self::require_any_role(actor, action, &[Role::PublicRelations])
    }

    /// # Errors
    ///
    /// Returns `Unauthorized` unless the caller is an administrator.
    pub fn authorize_administration(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), ApiError> {
        Self::require_any_role(actor, action, &[Role::Administrator])
    }

    /// Internal notes: municipal staff on any report, external maintainers
    /// only on reports they currently handle. Citizens never see them.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for anyone else.
    pub fn authorize_internal_notes(
        actor: &AuthenticatedActor,
        external_users: &[i64],
    ) -> Result<(), ApiError> {
        let handling_maintainer: bool = actor.roles.has_role(Role::ExternalMaintainer)
            && external_users.contains(&actor.user_id);
        if actor.roles.is_municipal_staff() || handling_maintainer {
            return Ok(());
        }
        Err(ApiError::Unauthorized {
            action: String::from("internal_notes"),
            required_role: String::from("municipal staff or the handling maintainer"),
        })
    }

    /// Conversation access: the reporting citizen, the internal assignee,
    /// the users behind the external handler and public relations staff.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for anyone else.
    pub fn authorize_conversation(
        actor: &AuthenticatedActor,
        report: &Report,
        external_users: &[i64],
    ) -> Result<(), ApiError> {
        let participant: bool = actor.user_id == report.user_id
            || report.is_assigned_to(actor.user_id)
            || external_users.contains(&actor.user_id)
            || actor.roles.has_role(Role::PublicRelations);
        if participant {
            return Ok(());
        }
        Err(ApiError::Unauthorized {
            action: String::from("messages"),
            required_role: String::from("a participant of this report"),
        })
    }
}
