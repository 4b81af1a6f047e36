//! The task record and the input shapes used to create and update it.
//!
//! A [`Task`] can only be built by the store from a [`TaskDraft`], and its
//! fields are only reachable through accessors, so every constraint checked
//! by [`crate::validate`] holds for the whole life of the record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::recurrence::Recurrence;
use crate::validate;

// =============================================================================
// Priority
// =============================================================================

/// Ordinal importance of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, lower sorts first
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(Error::invalid(format!(
                "Priority must be one of 'high', 'medium', or 'low', got: {s}"
            ))),
        }
    }
}

// =============================================================================
// Task
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: u64,
    title: String,
    description: String,
    completed: bool,
    priority: Priority,
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurrence: Option<Recurrence>,
}

impl Task {
    /// Build a task from a draft, checking every field before anything is
    /// constructed.
    pub(crate) fn from_draft(id: u64, draft: TaskDraft, default_priority: Priority) -> Result<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            priority: draft.priority.unwrap_or(default_priority),
            tags: draft.tags,
            due_date: draft.due_date,
            due_datetime: draft.due_datetime,
            recurrence: draft.recurrence,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    pub fn due_datetime(&self) -> Option<&str> {
        self.due_datetime.as_deref()
    }

    pub fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence
    }

    pub(crate) fn set_title(&mut self, title: String) -> Result<()> {
        validate::validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub(crate) fn set_description(&mut self, description: String) -> Result<()> {
        validate::validate_description(&description)?;
        self.description = description;
        Ok(())
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(crate) fn set_tags(&mut self, tags: Vec<String>) -> Result<()> {
        validate::validate_tags(&tags)?;
        self.tags = tags;
        Ok(())
    }

    /// Returns `false` when the tag was already present.
    pub(crate) fn add_tag(&mut self, tag: String) -> Result<bool> {
        validate::validate_tag(&tag)?;
        if self.has_tag(&tag) {
            return Ok(false);
        }
        self.tags.push(tag);
        Ok(true)
    }

    /// Returns `false` when the tag was not present.
    pub(crate) fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    pub(crate) fn set_due_date(&mut self, due_date: Option<String>) -> Result<()> {
        validate::validate_due_date(due_date.as_deref())?;
        self.due_date = due_date;
        Ok(())
    }

    pub(crate) fn set_due_datetime(&mut self, due_datetime: Option<String>) -> Result<()> {
        validate::validate_due_datetime(due_datetime.as_deref())?;
        self.due_datetime = due_datetime;
        Ok(())
    }

    pub(crate) fn set_recurrence(&mut self, recurrence: Option<Recurrence>) {
        self.recurrence = recurrence;
    }
}

// =============================================================================
// Draft and patch
// =============================================================================

/// Fields for a new task. Only `title` is required.
///
/// Deserializing rejects unknown fields, so a presentation layer feeding
/// JSON cannot silently pass options this version does not understand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub due_datetime: Option<String>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn due_datetime(mut self, due_datetime: impl Into<String>) -> Self {
        self.due_datetime = Some(due_datetime.into());
        self
    }

    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate::validate_title(&self.title)?;
        validate::validate_description(&self.description)?;
        validate::validate_tags(&self.tags)?;
        validate::validate_due_date(self.due_date.as_deref())?;
        validate::validate_due_datetime(self.due_datetime.as_deref())?;
        Ok(())
    }
}

/// A partial update. `None` leaves the field unchanged; there is no way to
/// clear an optional field through a patch. Use the dedicated setters
/// (`set_due_date`, `set_due_datetime`, `set_recurrence`, `set_tags`) for that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub due_datetime: Option<String>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn due_datetime(mut self, due_datetime: impl Into<String>) -> Self {
        self.due_datetime = Some(due_datetime.into());
        self
    }

    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply fields one at a time in declaration order.
    ///
    /// Not transactional: if a later field is invalid, fields applied before
    /// it stay applied.
    pub(crate) fn apply_to(self, task: &mut Task) -> Result<()> {
        if let Some(title) = self.title {
            task.set_title(title)?;
        }
        if let Some(description) = self.description {
            task.set_description(description)?;
        }
        if let Some(priority) = self.priority {
            task.set_priority(priority);
        }
        if let Some(tags) = self.tags {
            task.set_tags(tags)?;
        }
        if let Some(due_date) = self.due_date {
            task.set_due_date(Some(due_date))?;
        }
        if let Some(due_datetime) = self.due_datetime {
            task.set_due_datetime(Some(due_datetime))?;
        }
        if let Some(recurrence) = self.recurrence {
            task.set_recurrence(Some(recurrence));
        }
        Ok(())
    }
}
