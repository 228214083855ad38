//! Fluent rule builder.
//!
//! Every rule is evaluated eagerly when it is added and yields at most one
//! notification. Rules never short-circuit each other, so one chain reports
//! every violation at once.

use crate::validation::notification::{Notification, Notifications};

/// Collects notifications for failed rules.
///
/// ```
/// use todo_core::{Contract, Notifications};
///
/// let mut ledger = Notifications::new();
/// ledger.add_notifications(
///     Contract::new()
///         .requires()
///         .has_min_len("ab", 3, "Title", "too short")
///         .has_min_len("bob", 6, "User", "invalid user"),
/// );
/// assert_eq!(ledger.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
#[must_use = "a contract does nothing until its notifications are collected"]
pub struct Contract {
    notifications: Notifications,
}

impl Contract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a rule chain. Has no effect on its own.
    pub fn requires(self) -> Self {
        self
    }

    /// Fails when `value` is empty or shorter than `min` characters.
    pub fn has_min_len(self, value: &str, min: usize, key: &str, message: &str) -> Self {
        let len = value.chars().count();
        self.check(len > 0 && len >= min, key, message)
    }

    /// Fails when `value` is longer than `max` characters.
    pub fn has_max_len(self, value: &str, max: usize, key: &str, message: &str) -> Self {
        self.check(value.chars().count() <= max, key, message)
    }

    /// Fails when `value` is empty or whitespace only.
    pub fn is_not_null_or_empty(self, value: &str, key: &str, message: &str) -> Self {
        self.check(!value.trim().is_empty(), key, message)
    }

    /// Fails unless `value` is strictly greater than `reference`.
    pub fn is_greater_than<T: PartialOrd>(
        self,
        value: T,
        reference: T,
        key: &str,
        message: &str,
    ) -> Self {
        self.check(value > reference, key, message)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn is_valid(&self) -> bool {
        self.notifications.is_valid()
    }

    fn check(mut self, passed: bool, key: &str, message: &str) -> Self {
        if !passed {
            self.notifications.add_notification(key, message);
        }
        self
    }
}

impl IntoIterator for Contract {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.notifications.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Contract;
    use chrono::NaiveDate;

    #[test]
    fn has_min_len_rejects_empty_even_when_min_is_zero() {
        let contract = Contract::new().has_min_len("", 0, "Title", "required");
        assert!(!contract.is_valid());
    }

    #[test]
    fn has_min_len_accepts_exact_boundary() {
        let contract = Contract::new()
            .has_min_len("abc", 3, "Title", "too short")
            .has_min_len("abcdef", 6, "User", "too short");
        assert!(contract.is_valid());
    }

    #[test]
    fn all_rules_are_evaluated_without_short_circuit() {
        let contract = Contract::new()
            .requires()
            .has_min_len("a", 3, "Title", "too short")
            .is_not_null_or_empty("   ", "User", "required")
            .has_max_len("abcd", 3, "Title", "too long");

        let keys: Vec<&str> = contract
            .notifications()
            .iter()
            .map(|entry| entry.key.as_str())
            .collect();
        assert_eq!(keys, ["Title", "User", "Title"]);
    }

    #[test]
    fn is_greater_than_is_strict() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).expect("date should be valid");
        let tomorrow = today.succ_opt().expect("next day should exist");

        assert!(Contract::new()
            .is_greater_than(tomorrow, today, "Date", "past")
            .is_valid());
        assert!(!Contract::new()
            .is_greater_than(today, today, "Date", "past")
            .is_valid());
    }
}
