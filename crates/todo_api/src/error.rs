//! HTTP error mapping.
//!
//! Validation and not-found outcomes are regular `CommandResult`s and never
//! pass through here. This type covers what the core cannot recover from.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use todo_core::{HandlerError, Notification, RepoError};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failure envelope shaped like a `CommandResult`, for responses that never
/// reached the handler.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub data: Option<()>,
    pub notifications: Vec<Notification>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, notifications: Vec<Notification>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            notifications,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Handler(HandlerError),
    Repo(RepoError),
    /// Runtime plumbing failed (poisoned lock, cancelled blocking task).
    Unavailable(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Handler(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Handler(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<HandlerError> for ApiError {
    fn from(value: HandlerError) -> Self {
        Self::Handler(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("event=request_failed module=api status=error error={self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(INTERNAL_ERROR_MESSAGE, Vec::new())),
        )
            .into_response()
    }
}
