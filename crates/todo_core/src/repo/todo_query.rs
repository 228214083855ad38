//! Read-side task filters.
//!
//! Each query is always scoped to one owner. The same predicate is evaluated
//! in memory by [`TodoQuery::matches`] and translated to SQL by the SQLite
//! repository, so both paths agree on what a filter selects.

use crate::model::todo_item::TodoItem;
use chrono::NaiveDate;

/// Owner-scoped list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoQuery {
    /// Every task of the owner.
    All { owner: String },
    /// Completed tasks of the owner.
    Done { owner: String },
    /// Open tasks of the owner.
    Undone { owner: String },
    /// Tasks due on `date` whose done flag equals `done`.
    Period {
        owner: String,
        date: NaiveDate,
        done: bool,
    },
}

impl TodoQuery {
    pub fn all(owner: impl Into<String>) -> Self {
        Self::All {
            owner: owner.into(),
        }
    }

    pub fn done(owner: impl Into<String>) -> Self {
        Self::Done {
            owner: owner.into(),
        }
    }

    pub fn undone(owner: impl Into<String>) -> Self {
        Self::Undone {
            owner: owner.into(),
        }
    }

    pub fn period(owner: impl Into<String>, date: NaiveDate, done: bool) -> Self {
        Self::Period {
            owner: owner.into(),
            date,
            done,
        }
    }

    pub fn owner(&self) -> &str {
        match self {
            Self::All { owner }
            | Self::Done { owner }
            | Self::Undone { owner }
            | Self::Period { owner, .. } => owner,
        }
    }

    /// Required done flag, if the query constrains it.
    pub fn done_filter(&self) -> Option<bool> {
        match self {
            Self::All { .. } => None,
            Self::Done { .. } => Some(true),
            Self::Undone { .. } => Some(false),
            Self::Period { done, .. } => Some(*done),
        }
    }

    /// Required due date, if the query constrains it.
    pub fn date_filter(&self) -> Option<NaiveDate> {
        match self {
            Self::Period { date, .. } => Some(*date),
            _ => None,
        }
    }

    /// Owner comparison is exact and case-sensitive.
    pub fn matches(&self, item: &TodoItem) -> bool {
        item.owner() == self.owner()
            && self.done_filter().is_none_or(|done| item.is_done() == done)
            && self.date_filter().is_none_or(|date| item.date() == date)
    }

    /// Returns clones of the matching items, keeping input order.
    pub fn filter<'a, I>(&self, items: I) -> Vec<TodoItem>
    where
        I: IntoIterator<Item = &'a TodoItem>,
    {
        items
            .into_iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}
