//! Schema initialization for the task database.
//!
//! [`initialize`] makes sure a namespace (a SQLite file inside the configured
//! data directory) and its task table exist, then hands back the open
//! connection. Every step is idempotent, so it is safe to run on each
//! startup.
//!
//! # Example
//!
//! ```no_run
//! use task_manager_sqlite::{ConnectionConfig, initialize, schema_status};
//!
//! let config = ConnectionConfig::new("data");
//! let conn = initialize(&config, "task_manager").unwrap();
//!
//! let status = schema_status(&conn).unwrap();
//! assert!(status.table_exists);
//! ```

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Result, SqliteError};
use crate::schema::{TASKS_TABLE, generate_schema_sql, validate_namespace};

/// File extension of namespace database files.
const NAMESPACE_EXTENSION: &str = "db";

/// Connection parameters for the task database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Directory holding one database file per namespace.
    pub data_dir: PathBuf,
}

impl ConnectionConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the database file path for `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidNamespace`] if the name is empty or
    /// contains anything other than alphanumerics and underscores.
    pub fn namespace_path(&self, namespace: &str) -> Result<PathBuf> {
        validate_namespace(namespace)?;
        Ok(self
            .data_dir
            .join(format!("{namespace}.{NAMESPACE_EXTENSION}")))
    }
}

/// Creates the namespace and task table if absent and returns an open connection.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidNamespace`] for a bad namespace name and
/// [`SqliteError::InitializationError`] if the data directory, the database
/// file or the table cannot be created.
pub fn initialize(config: &ConnectionConfig, namespace: &str) -> Result<Connection> {
    let path = config.namespace_path(namespace)?;
    ensure_dir(&config.data_dir)?;

    let conn = Connection::open(&path).map_err(|e| {
        SqliteError::InitializationError(format!(
            "failed to open database '{}': {e}",
            path.display()
        ))
    })?;
    initialize_connection(&conn)?;

    info!(namespace, path = %path.display(), "database and task table initialized");
    Ok(conn)
}

/// Creates the task table on an already-open connection.
///
/// Runs within a transaction, so either the table and its index both exist
/// afterwards or nothing changed.
pub fn initialize_connection(conn: &Connection) -> Result<()> {
    let init_err = |e: rusqlite::Error| {
        SqliteError::InitializationError(format!("failed to create {TASKS_TABLE} table: {e}"))
    };
    let tx = conn.unchecked_transaction().map_err(init_err)?;
    tx.execute_batch(&generate_schema_sql()).map_err(init_err)?;
    tx.commit().map_err(init_err)?;
    debug!("task table ready");
    Ok(())
}

/// Snapshot of the task schema state.
///
/// Returned by [`schema_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Whether the task table exists.
    pub table_exists: bool,
    /// Number of stored tasks (zero when the table is missing).
    pub task_count: usize,
}

/// Reports whether the task table exists and how many rows it holds.
pub fn schema_status(conn: &Connection) -> Result<SchemaStatus> {
    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
        [TASKS_TABLE],
        |row| row.get(0),
    )?;

    if exists == 0 {
        return Ok(SchemaStatus {
            table_exists: false,
            task_count: 0,
        });
    }

    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {TASKS_TABLE}"), [], |row| {
        row.get(0)
    })?;

    Ok(SchemaStatus {
        table_exists: true,
        task_count: count as usize,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        SqliteError::InitializationError(format!(
            "failed to create data directory '{}': {e}",
            dir.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_path() {
        let config = ConnectionConfig::new("/var/lib/tasks");
        assert_eq!(
            config.namespace_path("work").unwrap(),
            PathBuf::from("/var/lib/tasks/work.db")
        );
        assert!(matches!(
            config.namespace_path("../work"),
            Err(SqliteError::InvalidNamespace(_))
        ));
    }

    #[test]
    fn test_status_on_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        let status = schema_status(&conn).unwrap();
        assert!(!status.table_exists);
        assert_eq!(status.task_count, 0);
    }

    #[test]
    fn test_initialize_connection_and_status() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_connection(&conn).unwrap();
        let status = schema_status(&conn).unwrap();
        assert!(status.table_exists);
        assert_eq!(status.task_count, 0);
    }

    #[test]
    fn test_initialize_connection_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_connection(&conn).unwrap();
        conn.execute("INSERT INTO tasks (name, description) VALUES ('a', 'b')", [])
            .unwrap();
        initialize_connection(&conn).unwrap();
        assert_eq!(schema_status(&conn).unwrap().task_count, 1);
    }
}
