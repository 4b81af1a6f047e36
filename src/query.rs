//! Search, filter and sort over a set of tasks.
//!
//! Everything here is read-only and returns owned snapshots. Input order is
//! the store's insertion order, which the title sort relies on for ties.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::task::{Priority, Task};

/// Completion state to filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Completed,
    Incomplete,
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::Completed => task.completed(),
            StatusFilter::Incomplete => !task.completed(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "completed" => Ok(StatusFilter::Completed),
            "incomplete" => Ok(StatusFilter::Incomplete),
            _ => Err(Error::invalid(format!(
                "Status must be 'completed' or 'incomplete', got: {s}"
            ))),
        }
    }
}

/// Conjunction of optional criteria; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFilter {
    #[serde(default)]
    pub status: Option<StatusFilter>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Compared by exact string equality against the task's `due_date`.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if !status.matches(task) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority() != priority {
                return false;
            }
        }
        if let Some(due_date) = self.due_date.as_deref() {
            if task.due_date() != Some(due_date) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Priority,
    DueDate,
    Title,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Priority => write!(f, "priority"),
            SortKey::DueDate => write!(f, "due_date"),
            SortKey::Title => write!(f, "title"),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "priority" => Ok(SortKey::Priority),
            "due_date" => Ok(SortKey::DueDate),
            "title" => Ok(SortKey::Title),
            _ => Err(Error::invalid(format!(
                "Sort key must be one of 'priority', 'due_date', or 'title', got: {s}"
            ))),
        }
    }
}

/// Case-insensitive substring match on title or description.
pub fn search<'a, I>(tasks: I, keyword: &str) -> Vec<Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let needle = keyword.to_lowercase();
    tasks
        .into_iter()
        .filter(|task| {
            task.title().to_lowercase().contains(&needle)
                || task.description().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn filter<'a, I>(tasks: I, criteria: &TaskFilter) -> Vec<Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| criteria.matches(task))
        .cloned()
        .collect()
}

pub fn sort<'a, I>(tasks: I, by: SortKey) -> Vec<Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<Task> = tasks.into_iter().cloned().collect();
    match by {
        SortKey::Priority => sorted.sort_by(|left, right| {
            left.priority()
                .rank()
                .cmp(&right.priority().rank())
                .then_with(|| left.id().cmp(&right.id()))
        }),
        SortKey::DueDate => sorted.sort_by(|left, right| {
            due_date_order(left.due_date(), right.due_date())
                .then_with(|| left.id().cmp(&right.id()))
        }),
        // Stable sort: equal titles keep insertion order.
        SortKey::Title => {
            sorted.sort_by_cached_key(|task| task.title().to_lowercase());
        }
    }
    sorted
}

/// Present dates ascend; missing dates sort last.
fn due_date_order(left: Option<&str>, right: Option<&str>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
