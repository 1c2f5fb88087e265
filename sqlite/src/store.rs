//! Task persistence over a SQLite connection.
//!
//! [`TaskStore`] owns the store handle and exposes create/read/update/delete
//! operations. Input is validated before any statement runs. Update and
//! delete detect unknown ids from the statement's affected-row count, so a
//! rejected call never touches the table.
//!
//! # Example
//!
//! ```no_run
//! use task_manager_core::{NewTask, TaskState};
//! use task_manager_sqlite::{ConnectionConfig, TaskStore};
//!
//! let mut store = TaskStore::open(&ConnectionConfig::new("data"), "task_manager").unwrap();
//!
//! let id = store.add(NewTask::pending("Task A", "Desc A").unwrap()).unwrap();
//! store.update_state(id, TaskState::Completed).unwrap();
//!
//! for task in store.list().unwrap() {
//!     println!("{} {} ({})", task.id, task.name, task.state);
//! }
//!
//! store.delete(id).unwrap();
//! ```

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use task_manager_core::{NewTask, Task, TaskId, TaskRepository, TaskState};
use tracing::debug;

use crate::convert::{self, TASK_COLUMNS, TaskRow};
use crate::error::{Result, SqliteError};
use crate::init::{ConnectionConfig, initialize, initialize_connection};
use crate::schema::TASKS_TABLE;

/// SQLite-backed task store.
///
/// Holds the single connection for the session. After [`close`](Self::close)
/// every operation fails with [`SqliteError::NoConnection`].
pub struct TaskStore {
    conn: Option<Connection>,
}

impl TaskStore {
    /// Wraps an open connection. The task table must already exist; see
    /// [`with_schema`](Self::with_schema) otherwise.
    pub fn new(conn: Connection) -> Self {
        Self { conn: Some(conn) }
    }

    /// Creates the task table on `conn` if needed and wraps it.
    pub fn with_schema(conn: Connection) -> Result<Self> {
        initialize_connection(&conn)?;
        Ok(Self::new(conn))
    }

    /// Initializes `namespace` under the configured data directory and opens it.
    ///
    /// # Errors
    ///
    /// Propagates [`initialize`] failures; they are fatal for the caller.
    pub fn open(config: &ConnectionConfig, namespace: &str) -> Result<Self> {
        Ok(Self::new(initialize(config, namespace)?))
    }

    /// Creates a task. Returns the id assigned by the database.
    pub fn add(&self, task: NewTask) -> Result<TaskId> {
        self.insert(&task, Utc::now())
    }

    /// Validates raw input and creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::Validation`] naming the first failing field
    /// (name, description, then state). Nothing is written in that case.
    pub fn add_raw(&self, name: &str, description: &str, state: &str) -> Result<TaskId> {
        let task = NewTask::parse(name, description, state)?;
        self.add(task)
    }

    fn insert(&self, task: &NewTask, created_at: DateTime<Utc>) -> Result<TaskId> {
        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {TASKS_TABLE} (name, description, state, created_at) VALUES (?1, ?2, ?3, ?4)"
            ),
            params![
                task.name(),
                task.description(),
                task.state().as_str(),
                convert::timestamp_to_string(&created_at)
            ],
        )?;
        let id = TaskId(conn.last_insert_rowid());
        debug!(%id, name = task.name(), "task added");
        Ok(id)
    }

    /// Returns all tasks ordered by creation time, oldest first.
    ///
    /// Tasks created within the same millisecond keep id order.
    pub fn list(&self) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM {TASKS_TABLE} ORDER BY created_at ASC, id ASC"
        ))?;

        let rows = stmt
            .query_map([], TaskRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(convert::task_from_row).collect()
    }

    /// Loads a single task. Returns `None` if no task has the given id.
    pub fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM {TASKS_TABLE} WHERE id = ?1"),
                params![id.get()],
                TaskRow::from_row,
            )
            .optional()?;
        row.map(convert::task_from_row).transpose()
    }

    /// Sets the state of a task. Name, description and creation time are
    /// never modified. Any state may follow any other.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidId`] if no task has the given id.
    pub fn update_state(&self, id: TaskId, state: TaskState) -> Result<()> {
        let rows = self.conn()?.execute(
            &format!("UPDATE {TASKS_TABLE} SET state = ?1 WHERE id = ?2"),
            params![state.as_str(), id.get()],
        )?;

        if rows == 0 {
            return Err(SqliteError::InvalidId(id));
        }

        debug!(%id, %state, "task state updated");
        Ok(())
    }

    /// Parses `state` and updates the task.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::Validation`] for an unknown state before
    /// touching the table.
    pub fn update_state_raw(&self, id: TaskId, state: &str) -> Result<()> {
        let state: TaskState = state.parse()?;
        self.update_state(id, state)
    }

    /// Physically removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidId`] if no task has the given id.
    pub fn delete(&self, id: TaskId) -> Result<()> {
        let rows = self.conn()?.execute(
            &format!("DELETE FROM {TASKS_TABLE} WHERE id = ?1"),
            params![id.get()],
        )?;

        if rows == 0 {
            return Err(SqliteError::InvalidId(id));
        }

        debug!(%id, "task deleted");
        Ok(())
    }

    /// Closes the connection. Later calls fail with [`SqliteError::NoConnection`].
    ///
    /// Closing an already closed store is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| SqliteError::DatabaseError(e))?;
            debug!("connection closed");
        }
        Ok(())
    }

    /// Returns `true` while the store holds a live connection.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> Result<&Connection> {
        self.conn()
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(SqliteError::NoConnection)
    }
}

impl TaskRepository for TaskStore {
    type Error = SqliteError;

    fn add(&mut self, task: NewTask) -> Result<TaskId> {
        TaskStore::add(self, task)
    }

    fn list(&self) -> Result<Vec<Task>> {
        TaskStore::list(self)
    }

    fn update_state(&mut self, id: TaskId, state: TaskState) -> Result<()> {
        TaskStore::update_state(self, id, state)
    }

    fn delete(&mut self, id: TaskId) -> Result<()> {
        TaskStore::delete(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TaskStore {
        TaskStore::with_schema(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_add_returns_increasing_ids() {
        let store = store();
        let a = store.add(NewTask::pending("a", "b").unwrap()).unwrap();
        let b = store.add(NewTask::pending("c", "d").unwrap()).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_get_missing_task() {
        let store = store();
        assert!(store.get(TaskId(1)).unwrap().is_none());
    }

    #[test]
    fn test_insert_with_explicit_timestamp() {
        let store = store();
        let ts = DateTime::parse_from_rfc3339("2020-01-02T03:04:05.678Z")
            .unwrap()
            .with_timezone(&Utc);
        let id = store
            .insert(&NewTask::pending("a", "b").unwrap(), ts)
            .unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().created_at, ts);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut store = store();
        assert!(store.is_open());
        store.close().unwrap();
        store.close().unwrap();
        assert!(!store.is_open());
    }
}
