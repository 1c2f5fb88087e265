//! Error types for the in-memory task store.

use thiserror::Error;

use crate::types::TaskId;
use crate::validate::ValidationError;

/// Errors returned by [`MemoryTaskStore`](crate::MemoryTaskStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Input failed a field check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No task with the given id exists.
    #[error("invalid task id: {0}")]
    InvalidId(TaskId),
}

/// Convenience alias for results with [`TaskError`].
pub type Result<T> = std::result::Result<T, TaskError>;
