//! Write-side commands.
//!
//! # Responsibility
//! - Represent each write request as an immutable value with its own rules.
//! - Expose one closed [`TodoCommand`] type for the handler to dispatch on.
//!
//! # Invariants
//! - Only the embedded ledger changes after construction.
//! - A command is actionable only after `validate()` ran and left no
//!   notifications.
//! - `validate()` swaps in a fresh ledger, so calling it again reproduces the
//!   same notifications instead of duplicating them.

pub mod result;
pub mod todo_commands;

use crate::model::todo_item::{TodoId, OWNER_MAX_CHARS, TITLE_MAX_CHARS};
use crate::validation::{Contract, Notifications};

pub use result::{CommandResult, FailureKind};
pub use todo_commands::{
    CreateTodoCommand, MarkTodoAsDoneCommand, MarkTodoAsUndoneCommand, UpdateTodoCommand,
};

pub const TITLE_KEY: &str = "Title";
pub const USER_KEY: &str = "User";
pub const ID_KEY: &str = "Id";

pub const TITLE_MIN_LEN: usize = 3;
pub const OWNER_MIN_LEN: usize = 6;
pub const TITLE_MAX_LEN: usize = TITLE_MAX_CHARS;
pub const OWNER_MAX_LEN: usize = OWNER_MAX_CHARS;

pub(crate) const TITLE_MESSAGE: &str = "Please describe the task better!";
const USER_MESSAGE: &str = "Invalid user!";

/// Capability set shared by every command.
pub trait Validatable {
    /// Re-evaluates all rules against current field values.
    fn validate(&mut self);

    fn notifications(&self) -> &Notifications;

    fn is_valid(&self) -> bool {
        self.notifications().is_valid()
    }

    fn is_invalid(&self) -> bool {
        !self.is_valid()
    }
}

/// Closed set of write operations accepted by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    Create(CreateTodoCommand),
    Update(UpdateTodoCommand),
    MarkAsDone(MarkTodoAsDoneCommand),
    MarkAsUndone(MarkTodoAsUndoneCommand),
}

impl TodoCommand {
    /// Stable short name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::MarkAsDone(_) => "mark_as_done",
            Self::MarkAsUndone(_) => "mark_as_undone",
        }
    }

    pub fn owner(&self) -> &str {
        match self {
            Self::Create(command) => command.owner(),
            Self::Update(command) => command.owner(),
            Self::MarkAsDone(command) => command.owner(),
            Self::MarkAsUndone(command) => command.owner(),
        }
    }

    /// Target task, absent for `Create`.
    pub fn target_id(&self) -> Option<TodoId> {
        match self {
            Self::Create(_) => None,
            Self::Update(command) => Some(command.id()),
            Self::MarkAsDone(command) => Some(command.id()),
            Self::MarkAsUndone(command) => Some(command.id()),
        }
    }
}

impl Validatable for TodoCommand {
    fn validate(&mut self) {
        match self {
            Self::Create(command) => command.validate(),
            Self::Update(command) => command.validate(),
            Self::MarkAsDone(command) => command.validate(),
            Self::MarkAsUndone(command) => command.validate(),
        }
    }

    fn notifications(&self) -> &Notifications {
        match self {
            Self::Create(command) => command.notifications(),
            Self::Update(command) => command.notifications(),
            Self::MarkAsDone(command) => command.notifications(),
            Self::MarkAsUndone(command) => command.notifications(),
        }
    }
}

impl From<CreateTodoCommand> for TodoCommand {
    fn from(value: CreateTodoCommand) -> Self {
        Self::Create(value)
    }
}

impl From<UpdateTodoCommand> for TodoCommand {
    fn from(value: UpdateTodoCommand) -> Self {
        Self::Update(value)
    }
}

impl From<MarkTodoAsDoneCommand> for TodoCommand {
    fn from(value: MarkTodoAsDoneCommand) -> Self {
        Self::MarkAsDone(value)
    }
}

impl From<MarkTodoAsUndoneCommand> for TodoCommand {
    fn from(value: MarkTodoAsUndoneCommand) -> Self {
        Self::MarkAsUndone(value)
    }
}

// Upper bounds match the entity limits.
fn title_rule(contract: Contract, title: &str) -> Contract {
    contract
        .has_min_len(title, TITLE_MIN_LEN, TITLE_KEY, TITLE_MESSAGE)
        .has_max_len(title, TITLE_MAX_LEN, TITLE_KEY, TITLE_MESSAGE)
}

fn owner_rule(contract: Contract, owner: &str) -> Contract {
    contract
        .has_min_len(owner, OWNER_MIN_LEN, USER_KEY, USER_MESSAGE)
        .has_max_len(owner, OWNER_MAX_LEN, USER_KEY, USER_MESSAGE)
}
