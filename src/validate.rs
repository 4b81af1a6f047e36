//! Field-level validation for task input.
//!
//! Every check here is stateless and fails with [`Error::InvalidInput`]
//! carrying a message suitable for showing to the user. Date and datetime
//! checks are syntactic only: `2025-13-45` passes `validate_due_date`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::task::Priority;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

static DUE_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

static DUE_DATETIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}$").unwrap());

/// A task id as supplied by a caller, before validation.
///
/// Integers are taken as-is; text is trimmed and parsed. Either way the
/// result must be a positive integer, see [`validate_task_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRef {
    Number(i128),
    Text(String),
}

impl From<i32> for TaskRef {
    fn from(value: i32) -> Self {
        TaskRef::Number(value.into())
    }
}

impl From<i64> for TaskRef {
    fn from(value: i64) -> Self {
        TaskRef::Number(value.into())
    }
}

impl From<u64> for TaskRef {
    fn from(value: u64) -> Self {
        TaskRef::Number(value.into())
    }
}

impl From<&str> for TaskRef {
    fn from(value: &str) -> Self {
        TaskRef::Text(value.to_string())
    }
}

impl From<String> for TaskRef {
    fn from(value: String) -> Self {
        TaskRef::Text(value)
    }
}

impl From<&String> for TaskRef {
    fn from(value: &String) -> Self {
        TaskRef::Text(value.clone())
    }
}

pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::invalid("Task title cannot be empty or only whitespace"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::invalid(format!(
            "Task title cannot exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(Error::invalid(format!(
            "Task description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Resolve a caller-supplied task id to a positive integer.
pub fn validate_task_id(task_id: impl Into<TaskRef>) -> Result<u64> {
    let number = match task_id.into() {
        TaskRef::Number(value) => value,
        TaskRef::Text(raw) => raw.trim().parse::<i128>().map_err(|_| {
            Error::invalid(format!("Task ID must be a valid integer, got: {raw}"))
        })?,
    };
    if number <= 0 {
        return Err(Error::invalid(format!(
            "Task ID must be a positive integer, got: {number}"
        )));
    }
    u64::try_from(number)
        .map_err(|_| Error::invalid(format!("Task ID is out of range, got: {number}")))
}

/// Parse a priority name; membership is exact and case-sensitive.
pub fn validate_priority(priority: &str) -> Result<Priority> {
    priority.parse()
}

/// Every tag must carry visible text. Duplicates are allowed here; only
/// `add_tag` refuses to insert a tag that is already present.
pub fn validate_tags<S: AsRef<str>>(tags: &[S]) -> Result<()> {
    tags.iter().try_for_each(|tag| validate_tag(tag.as_ref()))
}

pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.trim().is_empty() {
        return Err(Error::invalid("Tags cannot be empty or only whitespace"));
    }
    Ok(())
}

pub fn validate_due_date(due_date: Option<&str>) -> Result<()> {
    match due_date {
        Some(value) if !DUE_DATE_PATTERN.is_match(value) => Err(Error::invalid(format!(
            "Due date must be in ISO format (YYYY-MM-DD), got: {value}"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_due_datetime(due_datetime: Option<&str>) -> Result<()> {
    match due_datetime {
        Some(value) if !DUE_DATETIME_PATTERN.is_match(value) => Err(Error::invalid(format!(
            "Due datetime must be in ISO format (YYYY-MM-DD HH:MM), got: {value}"
        ))),
        _ => Ok(()),
    }
}
