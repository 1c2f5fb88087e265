//! Task type definitions.
//!
//! This module defines the data model shared by every storage backend. The
//! types serialize with [`serde`] so the CLI can render them as JSON or YAML.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, validate_description, validate_name};

/// Identifier assigned to a task by the store on creation.
///
/// Ids are never reused, even after the task that held one is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Lifecycle state of a task.
///
/// The nominal flow is `Pending -> InProgress -> Completed`, but stores
/// accept any state as an update target regardless of the current one.
///
/// # Examples
///
/// ```
/// use task_manager_core::TaskState;
///
/// assert_eq!(TaskState::default(), TaskState::Pending);
/// assert_eq!("in_progress".parse::<TaskState>().unwrap(), TaskState::InProgress);
/// assert!("done".parse::<TaskState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Not started yet (the state every new task gets by default).
    #[default]
    Pending,
    /// Work has started.
    InProgress,
    /// Finished.
    Completed,
}

impl TaskState {
    /// All states in lifecycle order.
    pub const ALL: [TaskState; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the storage name (`pending`, `in_progress`, `completed`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::InvalidState(other.to_string())),
        }
    }
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub state: TaskState,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a task.
///
/// The only constructor runs every field check, so a `NewTask` in hand is
/// always safe to persist.
///
/// # Examples
///
/// ```
/// use task_manager_core::{NewTask, TaskState, ValidationError};
///
/// let task = NewTask::new("Task A", "Desc A", TaskState::Pending).unwrap();
/// assert_eq!(task.name(), "Task A");
///
/// let err = NewTask::new("", "Desc A", TaskState::Pending).unwrap_err();
/// assert_eq!(err, ValidationError::EmptyName);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    name: String,
    description: String,
    state: TaskState,
}

impl NewTask {
    /// Validates the fields and builds a new task.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first field that fails, checking
    /// the name before the description.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        state: TaskState,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();
        validate_name(&name)?;
        validate_description(&description)?;
        Ok(Self {
            name,
            description,
            state,
        })
    }

    /// Builds a pending task.
    pub fn pending(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(name, description, TaskState::Pending)
    }

    /// Parses the state from its storage name and validates all fields.
    ///
    /// Field checks run in the order name, description, state.
    pub fn parse(name: &str, description: &str, state: &str) -> Result<Self, ValidationError> {
        validate_name(name)?;
        validate_description(description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            state: state.parse()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Turns the validated input into a task with the given id and timestamp.
    pub fn into_task(self, id: TaskId, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            name: self.name,
            description: self.description,
            state: self.state,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trips_through_str() {
        for state in TaskState::ALL {
            assert_eq!(state.as_str().parse::<TaskState>().unwrap(), state);
        }
    }

    #[test]
    fn test_state_parse_is_case_sensitive() {
        assert_eq!(
            "Pending".parse::<TaskState>(),
            Err(ValidationError::InvalidState("Pending".to_string()))
        );
    }

    #[test]
    fn test_state_serializes_as_snake_case() {
        let json = serde_json::to_string(&TaskState::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_new_task_pending_default() {
        let task = NewTask::pending("a", "b").unwrap();
        assert_eq!(task.state(), TaskState::Pending);
    }

    #[test]
    fn test_parse_reports_name_before_state() {
        assert_eq!(
            NewTask::parse("", "desc", "bogus"),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            NewTask::parse("name", "desc", "bogus"),
            Err(ValidationError::InvalidState("bogus".to_string()))
        );
    }

    #[test]
    fn test_parse_checks_name_length_before_state() {
        let long = "x".repeat(crate::MAX_NAME_LEN + 1);
        assert_eq!(
            NewTask::parse(&long, "d", "bogus"),
            Err(ValidationError::NameTooLong { len: 101 })
        );

        let task = NewTask::parse("name", "desc", "completed").unwrap();
        assert_eq!(task.name(), "name");
        assert_eq!(task.description(), "desc");
        assert_eq!(task.state(), TaskState::Completed);
    }

    #[test]
    fn test_task_id_display() {
        assert_eq!(TaskId(42).to_string(), "42");
        assert_eq!(TaskId::from(7).get(), 7);
    }
}
