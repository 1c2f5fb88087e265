//! Task field validation.
//!
//! Checks run at the boundary, before any store sees the input, so a failed
//! check never leaves a partial write behind. Lengths are counted in
//! characters, matching the `VARCHAR(n)` semantics of the task table.
//!
//! # Examples
//!
//! ```
//! use task_manager_core::{ValidationError, validate_name, MAX_NAME_LEN};
//!
//! assert!(validate_name("Buy milk").is_ok());
//! assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
//!
//! let long = "x".repeat(MAX_NAME_LEN + 1);
//! assert!(matches!(validate_name(&long), Err(ValidationError::NameTooLong { .. })));
//! ```

use thiserror::Error;

/// Maximum task name length in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum task description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Task field validation errors.
///
/// Each variant identifies the field that failed; see [`field`](Self::field).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Task name is empty.
    #[error("invalid task name: name cannot be empty")]
    EmptyName,
    /// Task name exceeds [`MAX_NAME_LEN`] characters.
    #[error("task name is too long: {len} characters (max {MAX_NAME_LEN})")]
    NameTooLong { len: usize },
    /// Task description is empty.
    #[error("invalid task description: description cannot be empty")]
    EmptyDescription,
    /// Task description exceeds [`MAX_DESCRIPTION_LEN`] characters.
    #[error("task description is too long: {len} characters (max {MAX_DESCRIPTION_LEN})")]
    DescriptionTooLong { len: usize },
    /// State is not one of `pending`, `in_progress`, `completed`.
    #[error("invalid task state: '{0}' (expected pending, in_progress or completed)")]
    InvalidState(String),
    /// Field contains a NUL character, which the task table cannot measure.
    #[error("invalid task {field}: NUL characters are not allowed")]
    NulCharacter { field: &'static str },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
            Self::InvalidState(_) => "state",
            Self::NulCharacter { field } => *field,
        }
    }
}

/// Checks that a task name is non-empty, NUL-free and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.contains('\0') {
        return Err(ValidationError::NulCharacter { field: "name" });
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong { len });
    }
    Ok(())
}

/// Checks that a description is non-empty, NUL-free and at most
/// [`MAX_DESCRIPTION_LEN`] characters.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    // SQLite's length() stops at the first NUL
    if description.contains('\0') {
        return Err(ValidationError::NulCharacter {
            field: "description",
        });
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong { len });
    }
    Ok(())
}

/// Truncates `value` to at most `max` characters.
///
/// Used by interactive front ends that shorten over-long input instead of
/// rejecting it.
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
