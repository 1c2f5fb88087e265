//! SQL schema generation for the task table.
//!
//! The table mirrors the task data model: an auto-assigned id that is never
//! reused (`AUTOINCREMENT`), length-bounded name and description, a state
//! restricted to the three lifecycle values, and an RFC 3339 creation time.
//!
//! # Namespaces
//!
//! A namespace is the logical database holding the task table. Its name ends
//! up in a file name, so it must contain only alphanumeric characters and
//! underscores.

use task_manager_core::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};

use crate::error::{Result, SqliteError};

/// Name of the task table.
pub const TASKS_TABLE: &str = "tasks";

/// Validates that a namespace contains only alphanumeric characters and underscores.
pub(crate) fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Err(SqliteError::InvalidNamespace(namespace.to_string()));
    }
    if !namespace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SqliteError::InvalidNamespace(namespace.to_string()));
    }
    Ok(())
}

/// Generates the `CREATE TABLE` and `CREATE INDEX` statements for the task table.
///
/// Uses `IF NOT EXISTS` throughout so the batch is safe to run repeatedly.
pub fn generate_schema_sql() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {TASKS_TABLE} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND {MAX_NAME_LEN}),
    description TEXT NOT NULL CHECK (length(description) BETWEEN 1 AND {MAX_DESCRIPTION_LEN}),
    state TEXT NOT NULL DEFAULT 'pending' CHECK (state IN ('pending', 'in_progress', 'completed')),
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_{TASKS_TABLE}_created_at ON {TASKS_TABLE}(created_at, id);
"#
    )
}
