//! Uniform result envelope returned by the handler.
//!
//! # Invariants
//! - `success == true` implies `data` is present and `notifications` is empty.
//! - `success == false` implies `data` is absent and `notifications` is not
//!   empty.

use crate::model::todo_item::TodoItem;
use crate::validation::{Notification, Notifications};
use serde::Serialize;

/// Why a command was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// One or more rules failed before any repository access.
    Validation,
    /// Target task does not exist for this owner.
    NotFound,
}

/// Outcome of one `TodoHandler::handle` call.
///
/// Serializes as `{success, message, data, notifications}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    success: bool,
    message: String,
    data: Option<TodoItem>,
    notifications: Vec<Notification>,
    #[serde(skip)]
    failure: Option<FailureKind>,
}

impl CommandResult {
    pub fn success(message: impl Into<String>, data: TodoItem) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            notifications: Vec::new(),
            failure: None,
        }
    }

    /// Rejected by validation.
    ///
    /// An empty ledger would break the envelope invariant, so it is expected
    /// to hold at least one entry; callers pass the command's ledger.
    pub fn invalid(message: impl Into<String>, notifications: Notifications) -> Self {
        Self::failure(FailureKind::Validation, message, notifications)
    }

    pub fn not_found(message: impl Into<String>, notifications: Notifications) -> Self {
        Self::failure(FailureKind::NotFound, message, notifications)
    }

    fn failure(kind: FailureKind, message: impl Into<String>, notifications: Notifications) -> Self {
        debug_assert!(notifications.is_invalid());
        Self {
            success: false,
            message: message.into(),
            data: None,
            notifications: notifications.into_vec(),
            failure: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&TodoItem> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<TodoItem> {
        self.data
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }
}
