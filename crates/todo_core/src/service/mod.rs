//! Core use-case services.
//!
//! # Responsibility
//! - Turn validated commands into persisted state changes.
//! - Keep HTTP and storage details out of the write pipeline.

pub mod todo_handler;
