// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller extraction for the server.
//!
//! Credentials are checked by the fronting session layer, which forwards
//! the authenticated user id in the `x-user-id` header. These extractors
//! trust that header and resolve it to an [`AuthenticatedActor`].

use axum::{extract::FromRequestParts, http::request::Parts};
use participium_api::{ApiError, AuthenticatedActor, authenticate_user};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// An authenticated caller. Rejects the request with 401 when the header
/// is missing, malformed, or names an unknown user.
pub struct SessionUser(pub AuthenticatedActor);

/// A caller that may be anonymous. A header that is present but invalid is
/// still rejected.
pub struct OptionalSessionUser(pub Option<AuthenticatedActor>);

fn header_user_id(parts: &Parts) -> Result<Option<i64>, HttpError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(Some)
        .ok_or_else(|| {
            warn!("Malformed {USER_ID_HEADER} header");
            HttpError::from(ApiError::AuthenticationFailed {
                reason: format!("{USER_ID_HEADER} must be a numeric user id"),
            })
        })
}

async fn resolve(state: &AppState, user_id: i64) -> Result<AuthenticatedActor, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor = authenticate_user(&mut persistence, user_id)?;
    debug!(user_id, "Caller resolved");
    Ok(actor)
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = header_user_id(parts)?.ok_or_else(|| {
            debug!("Missing {USER_ID_HEADER} header");
            HttpError::from(ApiError::AuthenticationFailed {
                reason: format!("Missing {USER_ID_HEADER} header"),
            })
        })?;
        Ok(Self(resolve(state, user_id).await?))
    }
}

impl FromRequestParts<AppState> for OptionalSessionUser {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match header_user_id(parts)? {
            Some(user_id) => Ok(Self(Some(resolve(state, user_id).await?))),
            None => Ok(Self(None)),
        }
    }
}
