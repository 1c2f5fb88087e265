//! Error types for SQLite task storage.
//!
//! Provides a unified error type covering database access, schema
//! initialization, input validation and id lookups.

use task_manager_core::{TaskId, ValidationError};
use thiserror::Error;

/// Errors that can occur during SQLite task operations.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// A stored row could not be converted into a task.
    #[error("conversion error: {0}")]
    ConversionError(String),

    /// The namespace or task table could not be created.
    #[error("database initialization failed: {0}")]
    InitializationError(String),

    /// Namespace name contains invalid characters.
    #[error("invalid namespace '{0}': must contain only alphanumeric characters and underscores")]
    InvalidNamespace(String),

    /// Input failed a field check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No task with the given id exists.
    #[error("invalid task id: {0}")]
    InvalidId(TaskId),

    /// The store handle is closed.
    #[error("no database connection")]
    NoConnection,
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
