//! Notification ledger.
//!
//! # Invariants
//! - Entries are append-only and keep insertion order.
//! - An empty ledger means "valid"; any entry means "invalid".

use serde::{Deserialize, Serialize};

/// One failed rule: which field, and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub key: String,
    pub message: String,
}

impl Notification {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Append-only accumulator of [`Notification`]s for one validatable object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notification(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Notification::new(key, message));
    }

    /// Appends every notification yielded by `source` (a contract, another
    /// ledger, or a plain iterator).
    pub fn add_notifications<I>(&mut self, source: I)
    where
        I: IntoIterator<Item = Notification>,
    {
        self.entries.extend(source);
    }

    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Notification> {
        self.entries
    }
}

impl IntoIterator for Notifications {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Notifications {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
