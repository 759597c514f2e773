//! Caller identity from trusted gateway headers.
//!
//! The authentication handshake (password check, token issuance) happens in
//! an upstream identity service; by the time a request reaches this core the
//! gateway has resolved it to `x-user-id` / `x-user-name` / `x-user-role`
//! headers. Absent headers mean an unauthenticated caller.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::authz::Identity;
use crate::errors::AppError;
use crate::store::Actor;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Authenticated caller; rejects with 401 when the gateway headers are
/// missing or malformed. Used by every mutating and admin-read route.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
}

impl CurrentUser {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::authenticated(self.id, self.name.clone(), self.role.clone())
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, USER_ID_HEADER)
            .ok_or_else(|| AppError::unauthorized(format!("{USER_ID_HEADER} header missing")))?;
        let id = Uuid::parse_str(&id)
            .map_err(|_| AppError::unauthorized(format!("{USER_ID_HEADER} is not a valid id")))?;
        let name = header(parts, USER_NAME_HEADER)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::unauthorized(format!("{USER_NAME_HEADER} header missing")))?;
        let role = header(parts, USER_ROLE_HEADER).filter(|r| !r.trim().is_empty());

        Ok(CurrentUser { id, name, role })
    }
}

/// Infallible variant for the access endpoints: a missing identity is an
/// evaluator input, not a rejection.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = match (
            header(parts, USER_ID_HEADER).and_then(|v| Uuid::parse_str(&v).ok()),
            header(parts, USER_NAME_HEADER),
        ) {
            (Some(id), Some(name)) => Identity::authenticated(
                id,
                name,
                header(parts, USER_ROLE_HEADER).filter(|r| !r.trim().is_empty()),
            ),
            _ => Identity::anonymous(),
        };
        Ok(Caller(identity))
    }
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
