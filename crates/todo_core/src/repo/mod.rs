//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract the command handler depends on.
//! - Isolate SQLite query details from handler orchestration.
//!
//! # Invariants
//! - Repository writes enforce `TodoItem::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod todo_query;
pub mod todo_repo;
