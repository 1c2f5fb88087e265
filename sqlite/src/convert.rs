//! Conversion between [`Task`] values and SQLite rows.
//!
//! Timestamps are stored as RFC 3339 UTC strings with millisecond precision
//! (`2024-05-01T09:30:00.123Z`). The fixed width keeps lexical order equal
//! to chronological order, which the `ORDER BY created_at` queries rely on.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use task_manager_core::{Task, TaskId, TaskState};

use crate::error::{Result, SqliteError};

/// Columns selected by every task query, in the order [`task_from_row`] reads them.
pub(crate) const TASK_COLUMNS: &str = "id, name, description, state, created_at";

/// Formats a timestamp for the `created_at` column.
pub(crate) fn timestamp_to_string(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored `created_at` value.
pub(crate) fn string_to_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| SqliteError::ConversionError(format!("invalid timestamp '{s}': {e}")))
}

/// Parses a stored `state` value.
pub(crate) fn string_to_state(s: &str) -> Result<TaskState> {
    s.parse()
        .map_err(|_| SqliteError::ConversionError(format!("unknown task state: {s}")))
}

/// Raw column values of a task row, before state and timestamp parsing.
pub(crate) struct TaskRow {
    id: i64,
    name: String,
    description: String,
    state: String,
    created_at: String,
}

impl TaskRow {
    /// Reads the [`TASK_COLUMNS`] of a result row.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            state: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

/// Builds a [`Task`] from raw row values.
pub(crate) fn task_from_row(row: TaskRow) -> Result<Task> {
    Ok(Task {
        id: TaskId(row.id),
        name: row.name,
        description: row.description,
        state: string_to_state(&row.state)?,
        created_at: string_to_timestamp(&row.created_at)?,
    })
}
