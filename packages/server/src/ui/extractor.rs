//! Identity extractors.
//!
//! Authentication happens upstream; the proxy forwards the trusted user id in
//! `x-user-id` and the role in `x-user-role`.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::StatusCode, http::request::Parts};

use crate::domain::UserId;

use super::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
const ADMIN_ROLE: &str = "admin";

/// Caller identity taken from `x-user-id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Identity of a WebSocket peer, if the proxy supplied one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalUser(pub Option<UserId>);

/// Caller with `x-user-role: admin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser(pub UserId);

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = header_value(parts, USER_ID_HEADER)
            .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "Authentication required"))?;
        UserId::new(raw.to_string())
            .map(AuthenticatedUser)
            .map_err(|e| ApiError::new(StatusCode::UNAUTHORIZED, e.to_string()))
    }
}

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, USER_ID_HEADER)
            .and_then(|raw| UserId::new(raw.to_string()).ok());
        Ok(OptionalUser(user_id))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user_id) = AuthenticatedUser::from_request_parts(parts, state).await?;
        if header_value(parts, USER_ROLE_HEADER) != Some(ADMIN_ROLE) {
            tracing::warn!("User '{}' denied access to an admin endpoint", user_id);
            return Err(ApiError::new(StatusCode::FORBIDDEN, "Admin role required"));
        }
        Ok(AdminUser(user_id))
    }
}
