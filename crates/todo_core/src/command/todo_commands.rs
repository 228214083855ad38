//! Concrete command values, one per write operation.

use super::{owner_rule, title_rule, Validatable};
use crate::model::todo_item::TodoId;
use crate::validation::{Contract, Notifications};
use chrono::NaiveDate;

/// Creates a new task for `owner`, due on `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoCommand {
    title: String,
    owner: String,
    date: NaiveDate,
    notifications: Notifications,
}

impl CreateTodoCommand {
    pub fn new(title: impl Into<String>, owner: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            owner: owner.into(),
            date,
            notifications: Notifications::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Validatable for CreateTodoCommand {
    fn validate(&mut self) {
        let contract = title_rule(Contract::new().requires(), &self.title);
        let contract = owner_rule(contract, &self.owner);
        self.notifications = Notifications::new();
        self.notifications.add_notifications(contract);
    }

    fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}

/// Renames an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoCommand {
    id: TodoId,
    title: String,
    owner: String,
    notifications: Notifications,
}

impl UpdateTodoCommand {
    pub fn new(id: TodoId, title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            owner: owner.into(),
            notifications: Notifications::new(),
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl Validatable for UpdateTodoCommand {
    fn validate(&mut self) {
        let contract = title_rule(Contract::new().requires(), &self.title);
        let contract = owner_rule(contract, &self.owner);
        self.notifications = Notifications::new();
        self.notifications.add_notifications(contract);
    }

    fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}

/// Marks an existing task as done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkTodoAsDoneCommand {
    id: TodoId,
    owner: String,
    notifications: Notifications,
}

impl MarkTodoAsDoneCommand {
    pub fn new(id: TodoId, owner: impl Into<String>) -> Self {
        Self {
            id,
            owner: owner.into(),
            notifications: Notifications::new(),
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl Validatable for MarkTodoAsDoneCommand {
    fn validate(&mut self) {
        let contract = owner_rule(Contract::new().requires(), &self.owner);
        self.notifications = Notifications::new();
        self.notifications.add_notifications(contract);
    }

    fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}

/// Reopens an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkTodoAsUndoneCommand {
    id: TodoId,
    owner: String,
    notifications: Notifications,
}

impl MarkTodoAsUndoneCommand {
    pub fn new(id: TodoId, owner: impl Into<String>) -> Self {
        Self {
            id,
            owner: owner.into(),
            notifications: Notifications::new(),
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl Validatable for MarkTodoAsUndoneCommand {
    fn validate(&mut self) {
        let contract = owner_rule(Contract::new().requires(), &self.owner);
        self.notifications = Notifications::new();
        self.notifications.add_notifications(contract);
    }

    fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}
