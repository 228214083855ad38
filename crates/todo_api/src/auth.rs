//! Authenticated principal extraction.
//!
//! Token verification happens upstream; the verified identity arrives in the
//! header named by `ServerConfig::user_header`. The owner of every command and
//! query is taken from here and never from the request body.

use crate::error::ErrorBody;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::debug;
use todo_core::Notification;

/// Owner identifier of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(String);

impl AuthenticatedUser {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_owner(self) -> String {
        self.0
    }
}

/// Missing or blank principal header.
#[derive(Debug)]
pub struct MissingPrincipal;

impl IntoResponse for MissingPrincipal {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(
            "Authentication required",
            vec![Notification::new("User", "Invalid user!")],
        );
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = MissingPrincipal;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get(state.user_header())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                debug!("event=auth_rejected module=api reason=missing_principal");
                MissingPrincipal
            })?;

        Ok(Self(owner.to_string()))
    }
}
