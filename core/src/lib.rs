//! Core task types, validation and the in-memory task store.
//!
//! This crate defines the data model shared by every task backend:
//!
//! - [`Task`] — a stored task (id, name, description, state, creation time).
//! - [`TaskState`] — the closed lifecycle enum `pending`/`in_progress`/`completed`.
//! - [`NewTask`] — validated input for creating a task.
//! - [`TaskRepository`] — the CRUD seam front ends depend on.
//! - [`MemoryTaskStore`] — a non-persistent [`TaskRepository`].
//!
//! Field checks ([`validate_name`], [`validate_description`]) enforce the
//! length bounds of the task table before input reaches any store.
//!
//! # Example
//!
//! ```
//! use task_manager_core::*;
//!
//! let mut store = MemoryTaskStore::new();
//! let id = store.add(NewTask::pending("Task A", "Desc A").unwrap()).unwrap();
//!
//! let tasks = store.list().unwrap();
//! assert_eq!(tasks.len(), 1);
//! assert_eq!(tasks[0].id, id);
//! assert_eq!(tasks[0].state, TaskState::Pending);
//! ```

mod error;
mod memory;
mod repository;
mod types;
mod validate;

pub use error::{Result, TaskError};
pub use memory::MemoryTaskStore;
pub use repository::TaskRepository;
pub use types::*;
pub use validate::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, ValidationError, truncate_chars, validate_description,
    validate_name,
};
