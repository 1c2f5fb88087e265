//! In-memory task store with no persistence.
//!
//! Tasks live in a `Vec` in insertion order, which is also creation order.
//! Ids come from a counter that never rewinds, so deleting the newest task
//! does not free its id.
//!
//! # Example
//!
//! ```
//! use task_manager_core::{MemoryTaskStore, NewTask, TaskRepository, TaskState};
//!
//! let mut store = MemoryTaskStore::new();
//! let id = store.add(NewTask::pending("Task A", "Desc A").unwrap()).unwrap();
//! store.update_state(id, TaskState::Completed).unwrap();
//! assert_eq!(store.list().unwrap()[0].state, TaskState::Completed);
//!
//! store.delete(id).unwrap();
//! assert!(store.list().unwrap().is_empty());
//! ```

use chrono::Utc;
use tracing::debug;

use crate::error::{Result, TaskError};
use crate::repository::TaskRepository;
use crate::types::{NewTask, Task, TaskId, TaskState};

/// Task store backed by a plain vector.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: Vec<Task>,
    last_id: i64,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Validates raw input and adds a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for the first failing field (name,
    /// description, then state); the store is left unchanged.
    pub fn add_raw(&mut self, name: &str, description: &str, state: &str) -> Result<TaskId> {
        let task = NewTask::parse(name, description, state)?;
        self.add(task)
    }

    /// Parses `state` and updates the task.
    pub fn update_state_raw(&mut self, id: TaskId, state: &str) -> Result<()> {
        let state: TaskState = state.parse()?;
        self.update_state(id, state)
    }

    fn position(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::InvalidId(id))
    }
}

impl TaskRepository for MemoryTaskStore {
    type Error = TaskError;

    fn add(&mut self, task: NewTask) -> Result<TaskId> {
        self.last_id += 1;
        let id = TaskId(self.last_id);
        debug!(%id, name = task.name(), "adding task");
        self.tasks.push(task.into_task(id, Utc::now()));
        Ok(id)
    }

    fn list(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn update_state(&mut self, id: TaskId, state: TaskState) -> Result<()> {
        let idx = self.position(id)?;
        debug!(%id, %state, "updating task state");
        self.tasks[idx].state = state;
        Ok(())
    }

    fn delete(&mut self, id: TaskId) -> Result<()> {
        let idx = self.position(id)?;
        debug!(%id, "deleting task");
        self.tasks.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;

    fn task(name: &str) -> NewTask {
        NewTask::pending(name, format!("{name} description")).unwrap()
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let store = MemoryTaskStore::new();
        assert!(store.list().unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut store = MemoryTaskStore::new();
        for name in ["a", "b", "c"] {
            store.add(task(name)).unwrap();
        }
        let names: Vec<_> = store.list().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_update_state_changes_only_state() {
        let mut store = MemoryTaskStore::new();
        let id = store.add(task("a")).unwrap();
        let before = store.get(id).unwrap().clone();

        store.update_state(id, TaskState::InProgress).unwrap();
        store.update_state(id, TaskState::InProgress).unwrap();

        let after = store.get(id).unwrap();
        assert_eq!(after.state, TaskState::InProgress);
        assert_eq!(after.name, before.name);
        assert_eq!(after.description, before.description);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_any_state_can_follow_any_state() {
        let mut store = MemoryTaskStore::new();
        let id = store.add(task("a")).unwrap();
        store.update_state(id, TaskState::Completed).unwrap();
        store.update_state(id, TaskState::Pending).unwrap();
        assert_eq!(store.get(id).unwrap().state, TaskState::Pending);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let mut store = MemoryTaskStore::new();
        store.add(task("a")).unwrap();
        let missing = TaskId(99999);

        assert_eq!(
            store.update_state(missing, TaskState::Completed),
            Err(TaskError::InvalidId(missing))
        );
        assert_eq!(store.delete(missing), Err(TaskError::InvalidId(missing)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_raw_input_is_validated() {
        let mut store = MemoryTaskStore::new();

        assert_eq!(
            store.add_raw("", "desc", "pending"),
            Err(TaskError::Validation(ValidationError::EmptyName))
        );
        assert_eq!(
            store.add_raw("a", "desc", "done"),
            Err(TaskError::Validation(ValidationError::InvalidState(
                "done".to_string()
            )))
        );
        assert_eq!(
            store.add_raw("\0a", "desc", "pending"),
            Err(TaskError::Validation(ValidationError::NulCharacter {
                field: "name"
            }))
        );
        assert!(store.is_empty());

        let id = store.add_raw("a", "desc", "in_progress").unwrap();
        assert_eq!(store.get(id).unwrap().state, TaskState::InProgress);

        assert_eq!(
            store.update_state_raw(id, "finished"),
            Err(TaskError::Validation(ValidationError::InvalidState(
                "finished".to_string()
            )))
        );
        store.update_state_raw(id, "completed").unwrap();
        assert_eq!(store.get(id).unwrap().state, TaskState::Completed);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = MemoryTaskStore::new();
        let first = store.add(task("a")).unwrap();
        store.delete(first).unwrap();
        let second = store.add(task("b")).unwrap();
        assert!(second > first);
    }
}
