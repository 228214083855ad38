//! Core domain logic for the task list.
//! This crate is the single source of truth for business invariants: the
//! command/handler/result write pipeline, the task entity and its storage.

pub mod command;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use command::{
    CommandResult, CreateTodoCommand, FailureKind, MarkTodoAsDoneCommand,
    MarkTodoAsUndoneCommand, TodoCommand, UpdateTodoCommand, Validatable,
};
pub use logging::{
    default_log_level, init_console_logging, init_logging, logging_status, LogTarget,
};
pub use model::todo_item::{TodoId, TodoItem, TodoValidationError};
pub use repo::todo_query::TodoQuery;
pub use repo::todo_repo::{RepoError, RepoResult, SqliteTodoRepository, TodoRepository};
pub use service::todo_handler::{HandlerError, HandlerResult, TodoHandler};
pub use validation::{Contract, Notification, Notifications};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
