//! Task domain model.
//!
//! # Responsibility
//! - Define the task entity and its state transitions.
//!
//! # Invariants
//! - Every task is identified by a stable `TodoId`.
//! - State changes go through entity methods, never direct field writes.

pub mod todo_item;
