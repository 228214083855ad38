//! Notification-based validation primitives.
//!
//! # Responsibility
//! - Record rule violations as `(key, message)` notifications.
//! - Provide the fluent contract used by commands to declare their rules.
//!
//! # Invariants
//! - Validation never performs I/O.
//! - A ledger only grows; a fresh object gets a fresh ledger.

pub mod contract;
pub mod notification;

pub use contract::Contract;
pub use notification::{Notification, Notifications};
