//! The storage seam between front ends and task backends.

use crate::types::{NewTask, Task, TaskId, TaskState};

/// Create/read/update/delete operations over tasks.
///
/// Implemented by [`MemoryTaskStore`](crate::MemoryTaskStore) and by the
/// SQLite-backed store. Input arrives already validated as a [`NewTask`] or a
/// [`TaskState`], so implementations only need to enforce id existence.
pub trait TaskRepository {
    /// Backend-specific error type.
    type Error: std::error::Error;

    /// Persists a new task and returns its id.
    fn add(&mut self, task: NewTask) -> Result<TaskId, Self::Error>;

    /// Returns all tasks, oldest first.
    fn list(&self) -> Result<Vec<Task>, Self::Error>;

    /// Sets the state of an existing task. Name, description and creation
    /// time are left untouched.
    fn update_state(&mut self, id: TaskId, state: TaskState) -> Result<(), Self::Error>;

    /// Removes an existing task.
    fn delete(&mut self, id: TaskId) -> Result<(), Self::Error>;
}
