//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record owned by one user.
//! - Expose the only state transitions allowed on a task (rename, done, undone).
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` holds 3..=160 characters once persisted.
//! - `owner` holds 1..=120 characters once persisted.
//! - `done` transitions are idempotent; marking twice is not an error.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TodoId = Uuid;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 160;
pub const OWNER_MAX_CHARS: usize = 120;

/// Entity-level invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    NilId,
    TitleTooShort { len: usize, min: usize },
    TitleTooLong { len: usize, max: usize },
    EmptyOwner,
    OwnerTooLong { len: usize, max: usize },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::TitleTooShort { len, min } => {
                write!(f, "title has {len} chars, needs at least {min}")
            }
            Self::TitleTooLong { len, max } => {
                write!(f, "title has {len} chars, allows at most {max}")
            }
            Self::EmptyOwner => write!(f, "owner must not be empty"),
            Self::OwnerTooLong { len, max } => {
                write!(f, "owner has {len} chars, allows at most {max}")
            }
        }
    }
}

impl Error for TodoValidationError {}

/// A single task on a user's list.
///
/// Fields are private: the handler mutates tasks only through
/// [`TodoItem::update_title`], [`TodoItem::mark_as_done`] and
/// [`TodoItem::mark_as_undone`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoItem {
    id: TodoId,
    title: String,
    owner: String,
    done: bool,
    /// Due date, date-only granularity.
    date: NaiveDate,
}

impl TodoItem {
    /// Creates a new open task with a generated stable ID.
    ///
    /// No validation runs here; commands validate input upstream and the
    /// repository re-checks [`TodoItem::validate`] before writing.
    pub fn new(title: impl Into<String>, owner: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            owner: owner.into(),
            done: false,
            date,
        }
    }

    /// Rehydrates a task with a known identity.
    ///
    /// Used by storage reads and import paths.
    ///
    /// # Errors
    /// Returns the first invariant the record violates.
    pub fn with_id(
        id: TodoId,
        title: impl Into<String>,
        owner: impl Into<String>,
        done: bool,
        date: NaiveDate,
    ) -> Result<Self, TodoValidationError> {
        let item = Self {
            id,
            title: title.into(),
            owner: owner.into(),
            done,
            date,
        };
        item.validate()?;
        Ok(item)
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

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Replaces the title.
    ///
    /// # Errors
    /// Rejects titles outside `3..=160` characters; the current title is kept.
    pub fn update_title(&mut self, title: impl Into<String>) -> Result<(), TodoValidationError> {
        let title = title.into();
        check_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn mark_as_done(&mut self) {
        self.done = true;
    }

    pub fn mark_as_undone(&mut self) {
        self.done = false;
    }

    /// Checks every entity invariant.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        check_title(&self.title)?;
        check_owner(&self.owner)
    }
}

fn check_title(title: &str) -> Result<(), TodoValidationError> {
    let len = title.chars().count();
    if len < TITLE_MIN_CHARS {
        return Err(TodoValidationError::TitleTooShort {
            len,
            min: TITLE_MIN_CHARS,
        });
    }
    if len > TITLE_MAX_CHARS {
        return Err(TodoValidationError::TitleTooLong {
            len,
            max: TITLE_MAX_CHARS,
        });
    }
    Ok(())
}

fn check_owner(owner: &str) -> Result<(), TodoValidationError> {
    let len = owner.chars().count();
    if len == 0 {
        return Err(TodoValidationError::EmptyOwner);
    }
    if len > OWNER_MAX_CHARS {
        return Err(TodoValidationError::OwnerTooLong {
            len,
            max: OWNER_MAX_CHARS,
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct TodoItemWire {
    id: TodoId,
    title: String,
    owner: String,
    #[serde(default)]
    done: bool,
    date: NaiveDate,
}

impl<'de> Deserialize<'de> for TodoItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = TodoItemWire::deserialize(deserializer)?;
        TodoItem::with_id(wire.id, wire.title, wire.owner, wire.done, wire.date)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{TodoItem, TodoValidationError};
    use chrono::NaiveDate;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).expect("date should be valid")
    }

    #[test]
    fn update_title_keeps_previous_value_on_rejection() {
        let mut item = TodoItem::new("Water plants", "alice1", due());

        let err = item.update_title("ok").expect_err("short title should be rejected");
        assert_eq!(err, TodoValidationError::TitleTooShort { len: 2, min: 3 });
        assert_eq!(item.title(), "Water plants");

        item.update_title("Water all plants").expect("rename should succeed");
        assert_eq!(item.title(), "Water all plants");
    }

    #[test]
    fn title_length_counts_chars_not_bytes() {
        let mut item = TodoItem::new("Café", "alice1", due());
        assert!(item.update_title("çãé").is_ok());
        assert!(item.update_title("é".repeat(160)).is_ok());
        assert!(matches!(
            item.update_title("é".repeat(161)),
            Err(TodoValidationError::TitleTooLong { len: 161, max: 160 })
        ));
    }

    #[test]
    fn validate_rejects_blank_and_oversized_owner() {
        let item = TodoItem::new("Buy bread", "", due());
        assert_eq!(item.validate(), Err(TodoValidationError::EmptyOwner));

        let item = TodoItem::new("Buy bread", "x".repeat(121), due());
        assert!(matches!(
            item.validate(),
            Err(TodoValidationError::OwnerTooLong { len: 121, .. })
        ));
    }
}
