//! Command handler for task writes.
//!
//! # Responsibility
//! - Run the per-request pipeline: validate, fail fast, load, mutate,
//!   persist, and build a [`CommandResult`].
//! - Keep the repository behind the [`TodoRepository`] contract.
//!
//! # Invariants
//! - Validation completes before any repository access.
//! - An invalid command never touches the repository.
//! - A task is only loaded by `(id, owner)`; a miss becomes a `NotFound`
//!   result, never a panic.
//! - Storage failures are returned as `Err`, never folded into a result.

use crate::command::{
    CommandResult, CreateTodoCommand, MarkTodoAsDoneCommand, MarkTodoAsUndoneCommand,
    TodoCommand, UpdateTodoCommand, Validatable, ID_KEY, TITLE_KEY, TITLE_MESSAGE,
};
use crate::model::todo_item::{TodoId, TodoItem};
use crate::repo::todo_repo::{RepoError, TodoRepository};
use crate::validation::Notifications;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INVALID_MESSAGE: &str = "There is a problem with the task.";
const NOT_FOUND_MESSAGE: &str = "Task not found";
const CREATED_MESSAGE: &str = "Task saved";
const UPDATED_MESSAGE: &str = "Task updated";
const DONE_MESSAGE: &str = "Task marked as done";
const UNDONE_MESSAGE: &str = "Task marked as undone";

pub type HandlerResult<T> = Result<T, HandlerError>;

/// Failures the handler cannot turn into a `CommandResult`.
#[derive(Debug)]
pub enum HandlerError {
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for HandlerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Dispatches each [`TodoCommand`] variant to its write path.
pub struct TodoHandler<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoHandler<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Handles one command end to end.
    ///
    /// # Errors
    /// Returns `HandlerError::Repo` only for storage failures. Validation
    /// failures and lookup misses are `Ok` results with `success == false`.
    pub fn handle(&self, command: impl Into<TodoCommand>) -> HandlerResult<CommandResult> {
        let mut command = command.into();
        let kind = command.kind();

        command.validate();
        if command.is_invalid() {
            info!(
                "event=command_rejected module=handler command={kind} reason=validation notifications={}",
                command.notifications().len()
            );
            return Ok(CommandResult::invalid(
                INVALID_MESSAGE,
                command.notifications().clone(),
            ));
        }
        debug!("event=command_validated module=handler command={kind}");

        let result = match command {
            TodoCommand::Create(command) => self.create(command),
            TodoCommand::Update(command) => self.update(command),
            TodoCommand::MarkAsDone(command) => self.mark_as_done(command),
            TodoCommand::MarkAsUndone(command) => self.mark_as_undone(command),
        }?;

        if result.is_success() {
            debug!("event=command_applied module=handler command={kind}");
        } else {
            info!("event=command_rejected module=handler command={kind} reason=not_found");
        }
        Ok(result)
    }

    fn create(&self, command: CreateTodoCommand) -> HandlerResult<CommandResult> {
        let todo = TodoItem::new(command.title(), command.owner(), command.date());
        self.repo.create(&todo)?;
        debug!("event=todo_created module=handler id={}", todo.id());
        Ok(CommandResult::success(CREATED_MESSAGE, todo))
    }

    fn update(&self, command: UpdateTodoCommand) -> HandlerResult<CommandResult> {
        let Some(mut todo) = self.load(command.id(), command.owner())? else {
            return Ok(not_found(command.id()));
        };

        if let Err(err) = todo.update_title(command.title()) {
            debug!("event=todo_rename_rejected module=handler id={} reason={err}", todo.id());
            let mut notifications = Notifications::new();
            notifications.add_notification(TITLE_KEY, TITLE_MESSAGE);
            return Ok(CommandResult::invalid(INVALID_MESSAGE, notifications));
        }

        self.persist(todo, UPDATED_MESSAGE)
    }

    fn mark_as_done(&self, command: MarkTodoAsDoneCommand) -> HandlerResult<CommandResult> {
        let Some(mut todo) = self.load(command.id(), command.owner())? else {
            return Ok(not_found(command.id()));
        };
        todo.mark_as_done();
        self.persist(todo, DONE_MESSAGE)
    }

    fn mark_as_undone(&self, command: MarkTodoAsUndoneCommand) -> HandlerResult<CommandResult> {
        let Some(mut todo) = self.load(command.id(), command.owner())? else {
            return Ok(not_found(command.id()));
        };
        todo.mark_as_undone();
        self.persist(todo, UNDONE_MESSAGE)
    }

    fn load(&self, id: TodoId, owner: &str) -> HandlerResult<Option<TodoItem>> {
        let todo = self.repo.get_by_id(id, owner)?;
        debug!(
            "event=todo_loaded module=handler id={id} found={}",
            todo.is_some()
        );
        Ok(todo)
    }

    fn persist(&self, todo: TodoItem, message: &str) -> HandlerResult<CommandResult> {
        match self.repo.update(&todo) {
            Ok(()) => Ok(CommandResult::success(message, todo)),
            // Row vanished between load and write.
            Err(RepoError::NotFound(id)) => Ok(not_found(id)),
            Err(err) => Err(err.into()),
        }
    }
}

fn not_found(id: TodoId) -> CommandResult {
    let mut notifications = Notifications::new();
    notifications.add_notification(ID_KEY, format!("{NOT_FOUND_MESSAGE}: {id}"));
    CommandResult::not_found(NOT_FOUND_MESSAGE, notifications)
}
